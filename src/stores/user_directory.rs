use crate::models::user::User;

/// In-memory, insertion-ordered user directory
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Create a new UserDirectory instance
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Add a user to the directory
    /// Returns false and leaves the directory untouched if the username is taken
    pub fn add_user(&mut self, user: User) -> bool {
        if self.contains(&user.username) {
            return false;
        }
        self.users.push(user);
        true
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }

    /// Get a user by username
    pub fn get_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn get_user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    /// All users in insertion order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
