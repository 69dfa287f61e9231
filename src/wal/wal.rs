use anyhow::{anyhow, bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// WAL operation types
#[derive(Debug, Clone, PartialEq)]
pub enum WalOperation {
    AddUser {
        username: String,
        password: String,
        role: String,
    },
    UpdateMembership {
        username: String,
        days_paid: u32,
        membership: String,
    },
}

// Free-form fields are hex encoded so '|' never appears inside one
fn decode_field(field: &str, what: &str) -> Result<String> {
    let bytes = hex::decode(field).context(format!("Invalid {} hex", what))?;
    String::from_utf8(bytes).context(format!("{} is not valid UTF-8", what))
}

impl WalOperation {
    fn to_line(&self) -> String {
        match self {
            WalOperation::AddUser {
                username,
                password,
                role,
            } => {
                format!(
                    "ADD_USER|{}|{}|{}",
                    hex::encode(username),
                    password,
                    hex::encode(role)
                )
            }
            WalOperation::UpdateMembership {
                username,
                days_paid,
                membership,
            } => {
                format!(
                    "UPDATE_MEMBERSHIP|{}|{}|{}",
                    hex::encode(username),
                    days_paid,
                    hex::encode(membership)
                )
            }
        }
    }

    fn from_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split('|').collect();

        match parts.first() {
            Some(&"ADD_USER") => {
                if parts.len() != 4 {
                    bail!("Invalid ADD_USER format");
                }
                let username = decode_field(parts[1], "username")?;
                let password = parts[2];
                if password.is_empty() || !password.bytes().all(|b| b.is_ascii_hexdigit()) {
                    bail!("Encoded password must be non-empty hex");
                }
                let role = decode_field(parts[3], "role")?;

                Ok(WalOperation::AddUser {
                    username,
                    password: password.to_string(),
                    role,
                })
            }
            Some(&"UPDATE_MEMBERSHIP") => {
                if parts.len() != 4 {
                    bail!("Invalid UPDATE_MEMBERSHIP format");
                }
                let username = decode_field(parts[1], "username")?;
                let days_paid = parts[2].parse::<u32>().context("Invalid days paid")?;
                let membership = decode_field(parts[3], "membership")?;

                Ok(WalOperation::UpdateMembership {
                    username,
                    days_paid,
                    membership,
                })
            }
            _ => bail!("Unknown operation type"),
        }
    }
}

// A crash mid-write leaves a last record without its newline. Cut it off so
// the next append starts on a fresh line instead of extending the torn one.
fn repair_torn_tail(path: &Path, file: &File) -> Result<()> {
    let contents = std::fs::read(path).context("Failed to read WAL for tail check")?;
    if contents.is_empty() || contents.ends_with(b"\n") {
        return Ok(());
    }

    let keep = contents
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);

    tracing::warn!(
        path = %path.display(),
        dropped_bytes = contents.len() - keep,
        "Torn record at end of WAL, truncating"
    );

    file.set_len(keep as u64).context("Failed to truncate torn WAL tail")?;
    Ok(())
}

/// Append-only operation log backing the user directory
pub struct Wal {
    file: Mutex<File>,
    path: PathBuf,
}

impl Wal {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context(format!("Failed to open WAL file: {}", path.display()))?;

        repair_torn_tail(&path, &file)?;

        Ok(Wal {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, File>> {
        self.file.lock().map_err(|_| anyhow!("WAL lock poisoned"))
    }

    pub fn log_operation(&self, op: &WalOperation) -> Result<()> {
        let line = op.to_line();
        let mut file = self.lock()?;
        writeln!(file, "{}", line).context("Failed to write to WAL")?;
        file.flush().context("Failed to flush WAL")?;
        Ok(())
    }

    pub fn replay(&self) -> Result<Vec<WalOperation>> {
        let file = File::open(&self.path).context("Failed to open WAL for replay")?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from WAL")?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match WalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse WAL line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }

    pub fn truncate(&self) -> Result<()> {
        let mut file = self.lock()?;
        file.set_len(0).context("Failed to truncate WAL")?;
        file.flush().context("Failed to flush WAL after truncate")?;
        Ok(())
    }
}
