use std::collections::HashMap;

use sysinfo::{Uid, Users};

/// Maps numeric uids to account names.
pub trait UserLookup {
    fn user_name(&mut self, uid: u32) -> Option<String>;
}

/// Name for `uid`, or the uid itself when the lookup has no entry.
pub fn resolve_user(lookup: &mut dyn UserLookup, uid: u32) -> String {
    lookup.user_name(uid).unwrap_or_else(|| uid.to_string())
}

/// A reloadable source of account names.
pub trait AccountList {
    fn find(&self, uid: u32) -> Option<String>;
    fn reload(&mut self);
}

impl AccountList for Users {
    fn find(&self, uid: u32) -> Option<String> {
        Uid::try_from(uid as usize)
            .ok()
            .and_then(|id| self.get_user_by_id(&id))
            .map(|user| user.name().to_string())
    }

    fn reload(&mut self) {
        self.refresh();
    }
}

/// Per-uid cache over an [`AccountList`]. A miss reloads the list once
/// before the uid is remembered as unnamed.
pub struct CachedUsers<A = Users> {
    accounts: A,
    cache: HashMap<u32, Option<String>>,
}

/// Account database of the host.
pub type SystemUsers = CachedUsers<Users>;

impl Default for SystemUsers {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemUsers {
    pub fn new() -> Self {
        Self::with_accounts(Users::new_with_refreshed_list())
    }
}

impl<A: AccountList> CachedUsers<A> {
    pub fn with_accounts(accounts: A) -> Self {
        Self {
            accounts,
            cache: HashMap::new(),
        }
    }
}

impl<A: AccountList> UserLookup for CachedUsers<A> {
    fn user_name(&mut self, uid: u32) -> Option<String> {
        if let Some(cached) = self.cache.get(&uid) {
            return cached.clone();
        }
        let name = self.accounts.find(uid).or_else(|| {
            tracing::trace!(uid, "uid not in account list, reloading");
            self.accounts.reload();
            self.accounts.find(uid)
        });
        self.cache.insert(uid, name.clone());
        name
    }
}

/// Fixed table, handy for fixtures.
impl UserLookup for HashMap<u32, String> {
    fn user_name(&mut self, uid: u32) -> Option<String> {
        self.get(&uid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_uid_falls_back_to_number() {
        let mut table: HashMap<u32, String> = HashMap::from([(0, "root".to_string())]);
        assert_eq!(resolve_user(&mut table, 0), "root");
        assert_eq!(resolve_user(&mut table, 4242), "4242");
    }

    /// Accounts that only show up once the list is reloaded.
    struct LateAccounts {
        visible: HashMap<u32, String>,
        pending: HashMap<u32, String>,
        reloads: usize,
    }

    impl AccountList for LateAccounts {
        fn find(&self, uid: u32) -> Option<String> {
            self.visible.get(&uid).cloned()
        }

        fn reload(&mut self) {
            self.reloads += 1;
            self.visible.extend(self.pending.drain());
        }
    }

    #[test]
    fn miss_reloads_accounts_before_giving_up() {
        let accounts = LateAccounts {
            visible: HashMap::from([(0, "root".to_string())]),
            pending: HashMap::from([(1001, "newbie".to_string())]),
            reloads: 0,
        };
        let mut users = CachedUsers::with_accounts(accounts);

        assert_eq!(resolve_user(&mut users, 0), "root");
        assert_eq!(users.accounts.reloads, 0);

        assert_eq!(resolve_user(&mut users, 1001), "newbie");
        assert_eq!(users.accounts.reloads, 1);

        assert_eq!(resolve_user(&mut users, 4242), "4242");
        assert_eq!(users.accounts.reloads, 2);

        // cached, no further reloads
        assert_eq!(resolve_user(&mut users, 4242), "4242");
        assert_eq!(resolve_user(&mut users, 1001), "newbie");
        assert_eq!(users.accounts.reloads, 2);
    }

    #[test]
    fn system_lookup_does_not_panic() {
        let mut users = SystemUsers::new();
        let first = resolve_user(&mut users, u32::MAX - 1);
        let second = resolve_user(&mut users, u32::MAX - 1);
        assert_eq!(first, second);
    }
}
