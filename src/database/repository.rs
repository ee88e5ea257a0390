pub mod creators_repository;
pub mod games_repository;
pub mod tags_repository;
