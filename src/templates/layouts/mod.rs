pub mod mini_app;
