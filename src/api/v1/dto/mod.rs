pub mod episodes;
pub mod podcasts;
pub mod reviews;
pub mod users;
