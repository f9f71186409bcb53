use std::collections::HashSet;

use tusklist_common::{Account, AccountId};

use super::ListEntry;

/// What to do with a freshly fetched page
#[derive(Debug, Clone, PartialEq)]
pub enum PageMerge {
    /// First page: replace everything displayed with these accounts
    Replace(Vec<Account>),
    /// Continuation: append these accounts after the displayed ones
    Append(Vec<Account>),
    /// No new data, the list is exhausted
    EndOfData,
}

/// Whether `page` holds an account with the given id
pub fn contains_account(page: &[Account], id: &AccountId) -> bool {
    page.iter().any(|account| &account.id == id)
}

/// Decide how `page`, fetched after `cursor`, merges into `displayed`.
///
/// A continuation page that is empty, or that repeats the cursor account,
/// means the server has nothing newer to give, so it ends the list rather
/// than being appended. Accounts that are already displayed (or repeated
/// within the page) are dropped.
pub fn merge_page(
    cursor: Option<&AccountId>,
    page: Vec<Account>,
    displayed: &[ListEntry],
) -> PageMerge {
    match cursor {
        None => {
            let page = dedup(page, &HashSet::new());
            if page.is_empty() {
                PageMerge::EndOfData
            } else {
                PageMerge::Replace(page)
            }
        }
        Some(cursor) => {
            if page.is_empty() || contains_account(&page, cursor) {
                return PageMerge::EndOfData;
            }
            let seen = displayed.iter().map(|e| &e.account.id).collect();
            let page = dedup(page, &seen);
            if page.is_empty() {
                PageMerge::EndOfData
            } else {
                PageMerge::Append(page)
            }
        }
    }
}

fn dedup(page: Vec<Account>, seen: &HashSet<&AccountId>) -> Vec<Account> {
    let mut fresh: HashSet<AccountId> = HashSet::with_capacity(page.len());
    page.into_iter()
        .filter(|account| !seen.contains(&account.id) && fresh.insert(account.id.clone()))
        .collect()
}
