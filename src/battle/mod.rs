pub mod capture;
pub mod damage;
pub mod move_ranking;
pub mod rng;

#[cfg(test)]
mod tests;
