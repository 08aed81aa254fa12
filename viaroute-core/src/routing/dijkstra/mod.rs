mod state;
mod traced;

pub(crate) use traced::dijkstra_path;
