mod common;

#[cfg(test)]
mod test_damage_scenarios;
