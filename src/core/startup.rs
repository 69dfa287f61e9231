use tracing::warn;

use crate::models::user::User;
use crate::stores::user_directory::UserDirectory;
use crate::wal::wal::WalOperation;

// this runs when the store is opened
pub fn apply_wal_operations(directory: &mut UserDirectory, operations: &[WalOperation]) {
    for op in operations {
        match op {
            WalOperation::AddUser { username, password, role } => {
                let user = User::new(username, password, role);
                if !directory.add_user(user) {
                    warn!(username = %username, "Duplicate user in WAL, keeping first record");
                }
            }
            WalOperation::UpdateMembership { username, days_paid, membership } => {
                match directory.get_user_mut(username) {
                    Some(user) => user.apply_membership(*days_paid, membership),
                    None => {
                        warn!(username = %username, "Membership update for unknown user in WAL, skipping");
                    }
                }
            }
        }
    }
}
