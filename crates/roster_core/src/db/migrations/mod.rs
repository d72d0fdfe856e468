//! Ordered table-layout upgrades for the roster file.
//!
//! # Invariants
//! - Layout numbers increase by one per entry in `UPGRADES`.
//! - After an upgrade, `PRAGMA user_version` equals the last applied layout.
//! - All pending upgrades commit together or not at all.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(layout, sql)` pairs, oldest first.
const UPGRADES: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Where a connection's table layout stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    Current,
    Pending { from: u32, to: u32 },
    Newer { found: u32, supported: u32 },
}

/// Layout number this build writes.
pub fn latest_version() -> u32 {
    UPGRADES.last().map_or(0, |&(layout, _)| layout)
}

pub fn layout_status(conn: &Connection) -> DbResult<LayoutStatus> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();
    Ok(match found.cmp(&supported) {
        std::cmp::Ordering::Equal => LayoutStatus::Current,
        std::cmp::Ordering::Less => LayoutStatus::Pending {
            from: found,
            to: supported,
        },
        std::cmp::Ordering::Greater => LayoutStatus::Newer { found, supported },
    })
}

/// Brings the connection up to `latest_version()`.
///
/// # Errors
/// - `NewerLayout` when the file was written by a newer release; the file
///   is left untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = match layout_status(conn)? {
        LayoutStatus::Current => return Ok(()),
        LayoutStatus::Newer { found, supported } => {
            return Err(DbError::NewerLayout { found, supported })
        }
        LayoutStatus::Pending { from, .. } => from,
    };

    let tx = conn.transaction()?;
    for &(layout, sql) in UPGRADES.iter().filter(|&&(layout, _)| layout > from) {
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {layout};"))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={}",
        latest_version()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, layout_status, LayoutStatus};
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_is_pending_until_upgraded() {
        let mut conn = Connection::open_in_memory().expect("raw connection should open");
        assert_eq!(
            layout_status(&conn).expect("status should be readable"),
            LayoutStatus::Pending {
                from: 0,
                to: latest_version()
            }
        );

        apply_migrations(&mut conn).expect("upgrade should succeed");
        assert_eq!(
            layout_status(&conn).expect("status should be readable"),
            LayoutStatus::Current
        );
    }
}
