pub mod film_handlers;
pub mod user_handlers;
