pub mod joke;
