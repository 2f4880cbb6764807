use area_pathfinding::{find_shortest_path, Coordinate, GridMap, Occupancy};

// In this example a path is found on a grid with shape
// S#.
// .#.
// ..E
// S marks the start
// E marks the end
fn main() {
    let cells = (1..=3).flat_map(|y| {
        (1..=3).map(move |x| {
            let occupancy = if x == 2 && y < 3 {
                Occupancy::Obstacle
            } else {
                Occupancy::Free
            };
            (Coordinate::new(x, y), occupancy)
        })
    });
    let grid = GridMap::from_occupancy(cells);
    let start = Coordinate::new(1, 1);
    let end = Coordinate::new(3, 3);
    if let Some(path) = find_shortest_path(&grid, start, end) {
        println!("A path has been found:");
        print!("{}", grid.render(&path));
        for p in path {
            println!("{}", p);
        }
    }
}
