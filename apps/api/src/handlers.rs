pub mod health;
pub mod memberships;
pub mod permissions;

#[cfg(test)]
mod test_support;
