// file: src/config/group.rs
// version: 1.0.1
// guid: grp5a6b7-c8d9-0123-4567-890123fedcba

//! Typed Helix group record
//!
//! Rendered in the server's tab-delimited administrative format and fed into
//! `p4 group -i`. The standard record defines a group whose members receive
//! tickets that never expire.

use crate::error::ProvisionError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A Helix group definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub group: String,
    pub timeout: String,
    pub users: Vec<String>,
}

impl GroupSpec {
    /// Group with unlimited ticket timeout containing the superuser
    pub fn no_timeout(group: &str, super_user: &str) -> Self {
        Self {
            group: group.to_string(),
            timeout: "unlimited".to_string(),
            users: vec![super_user.to_string()],
        }
    }

    /// Render the record: group name, timeout, then the users section
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Group:\t{}\n", self.group));
        out.push_str(&format!("Timeout:\t{}\n", self.timeout));
        out.push_str("Users:\n");
        for user in &self.users {
            out.push_str(&format!("\t{}\n", user));
        }
        out
    }

    /// Parse a record produced by [`render`](Self::render)
    pub fn parse(text: &str) -> Result<Self> {
        let mut group = None;
        let mut timeout = None;
        let mut users = Vec::new();
        let mut in_users = false;

        for line in text.lines() {
            if let Some(value) = line.strip_prefix("Group:\t") {
                group = Some(value.to_string());
                in_users = false;
            } else if let Some(value) = line.strip_prefix("Timeout:\t") {
                timeout = Some(value.to_string());
                in_users = false;
            } else if line == "Users:" {
                in_users = true;
            } else if in_users {
                if let Some(user) = line.strip_prefix('\t') {
                    users.push(user.to_string());
                }
            }
        }

        Ok(Self {
            group: group.ok_or_else(|| ProvisionError::template("group record missing Group:"))?,
            timeout: timeout
                .ok_or_else(|| ProvisionError::template("group record missing Timeout:"))?,
            users,
        })
    }
}
