use crate::core::config::StorageConfig;
use crate::core::error::{DirectoryError, IncorrectCardData};
use crate::core::startup::apply_wal_operations;
use crate::models::user::User;
use crate::stores::user_directory::UserDirectory;
use crate::utils::auth::{encode_password, verify_encoded_password};
use crate::validation::card;
use crate::wal::wal::{Wal, WalOperation};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, info, warn};

/// User directory service
///
/// Owns the in-memory directory and the WAL file that persists it. Every
/// mutation is written to the WAL before it is applied in memory, so a
/// failed write never leaves a partial record behind.
pub struct UserService {
    directory: UserDirectory,
    wal: Wal,
}

impl UserService {
    /// Open the store described by `config`, creating the home folder if
    /// needed, and replay it into memory
    pub fn open(config: &StorageConfig) -> Result<Self, DirectoryError> {
        std::fs::create_dir_all(&config.home_folder).context(format!(
            "Failed to create home folder: {}",
            config.home_folder.display()
        ))?;

        let wal = Wal::new(config.database_path())?;
        let operations = wal.replay().context("Failed to replay WAL")?;

        let mut directory = UserDirectory::new();
        apply_wal_operations(&mut directory, &operations);

        info!(
            path = %wal.path().display(),
            operations_replayed = operations.len(),
            users_loaded = directory.len(),
            "User directory opened"
        );

        Ok(Self { directory, wal })
    }

    /// Wipe every persisted user
    pub fn init_database(&mut self) -> Result<(), DirectoryError> {
        self.wal.truncate()?;
        self.directory.clear();
        info!(path = %self.wal.path().display(), "User directory initialized");
        Ok(())
    }

    pub fn get_all_users(&self) -> &[User] {
        self.directory.users()
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.directory.get_user(username)
    }

    pub fn check_user_does_not_already_exist(&self, username: &str) -> Result<(), DirectoryError> {
        if self.directory.contains(username) {
            return Err(DirectoryError::UsernameAlreadyExists(username.to_string()));
        }
        Ok(())
    }

    pub fn add_user(&mut self, username: &str, password: &str, role: &str) -> Result<(), DirectoryError> {
        if let Err(e) = self.check_user_does_not_already_exist(username) {
            warn!(username = %username, "Username already exists");
            return Err(e);
        }

        let user = User::new(username, &encode_password(username, password), role);

        self.wal.log_operation(&WalOperation::AddUser {
            username: user.username.clone(),
            password: user.password.clone(),
            role: user.role.clone(),
        })?;

        self.directory.add_user(user);

        info!(username = %username, role = %role, "User added");

        Ok(())
    }

    pub fn update_membership(
        &mut self,
        username: &str,
        days_paid: u32,
        membership: &str,
    ) -> Result<(), DirectoryError> {
        if !self.directory.contains(username) {
            warn!(username = %username, "Membership update for unknown user");
            return Err(DirectoryError::UserNotFound(username.to_string()));
        }

        self.wal.log_operation(&WalOperation::UpdateMembership {
            username: username.to_string(),
            days_paid,
            membership: membership.to_string(),
        })?;

        let user = self
            .directory
            .get_user_mut(username)
            .ok_or_else(|| DirectoryError::UserNotFound(username.to_string()))?;
        user.apply_membership(days_paid, membership);

        info!(
            username = %username,
            membership = %membership,
            days_paid = days_paid,
            days_left = user.days_left,
            pending = user.memberships.len(),
            "Membership updated"
        );

        Ok(())
    }

    /// Check a login attempt and return the matching user
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&User, DirectoryError> {
        let user = self.directory.get_user(username).ok_or_else(|| {
            debug!(username = %username, "Login for unknown user");
            DirectoryError::InvalidCredentials
        })?;

        let provided = encode_password(username, password);
        if !verify_encoded_password(&provided, &user.password) {
            debug!(username = %username, "Wrong password");
            return Err(DirectoryError::InvalidCredentials);
        }

        Ok(user)
    }

    pub fn check_valid_card(
        card_number: &str,
        card_holder_name: &str,
        expiry_date: &str,
        cvv: &str,
    ) -> Result<(), IncorrectCardData> {
        card::check_valid_card(card_number, card_holder_name, expiry_date, cvv)
    }

    pub fn encode_password(username: &str, password: &str) -> String {
        encode_password(username, password)
    }

    pub fn database_path(&self) -> &Path {
        self.wal.path()
    }
}
