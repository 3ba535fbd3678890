pub mod door;
pub mod gate;
pub mod register_exit;
pub mod summary;
pub mod verify;
