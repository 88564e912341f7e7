pub mod cluster_cost;
