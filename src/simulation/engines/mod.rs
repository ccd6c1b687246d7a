pub mod transit_engine;
