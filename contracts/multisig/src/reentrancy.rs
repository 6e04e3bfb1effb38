use soroban_sdk::{Env, Symbol};

use crate::errors::MultisigError;

const LOCK_KEY: &str = "EXECUTE_LOCK";

/// Scoped lock held for the whole of `execute_transaction`.
///
/// A dispatch target that calls back into the engine while the lock is held
/// gets [`MultisigError::Reentrancy`]. The lock is released on drop, on both
/// the success and the error path.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn new(env: &'a Env) -> Result<Self, MultisigError> {
        let key = Symbol::new(env, LOCK_KEY);
        if env.storage().temporary().has(&key) {
            return Err(MultisigError::Reentrancy);
        }
        env.storage().temporary().set(&key, &true);
        Ok(Self { env })
    }

    #[cfg(test)]
    pub fn is_held(env: &Env) -> bool {
        env.storage().temporary().has(&Symbol::new(env, LOCK_KEY))
    }
}

impl<'a> Drop for ReentrancyGuard<'a> {
    fn drop(&mut self) {
        let key = Symbol::new(self.env, LOCK_KEY);
        self.env.storage().temporary().remove(&key);
    }
}
