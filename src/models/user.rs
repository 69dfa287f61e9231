#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Unique, case-sensitive login name
    pub username: String,
    /// Encoded password, see `utils::auth::encode_password`
    pub password: String,
    /// Free-form role, e.g. "admin" or "client"
    pub role: String,
    /// Memberships requested but not paid yet, in request order
    pub memberships: Vec<String>,
    /// Paid membership days accumulated so far
    pub days_left: u32,
}

impl User {
    pub fn new(username: &str, password: &str, role: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            memberships: Vec::new(),
            days_left: 0,
        }
    }

    /// Record a membership request or payment
    ///
    /// `days_paid == 0` queues the membership as unpaid. Any other value marks
    /// the first matching unpaid entry as paid and credits the days.
    pub fn apply_membership(&mut self, days_paid: u32, membership: &str) {
        if days_paid == 0 {
            self.memberships.push(membership.to_string());
            return;
        }

        if let Some(pos) = self.memberships.iter().position(|m| m == membership) {
            self.memberships.remove(pos);
        }
        self.days_left = self.days_left.saturating_add(days_paid);
    }
}
