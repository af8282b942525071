pub mod repository_handler;
