//! SQLite answer-key store.
//!
//! Schema:
//!
//! ```text
//! contests(id, name UNIQUE)
//! job_roles(id, contest_id, name, exam_kind, UNIQUE(contest_id, name))
//! answers(id, job_role_id, question_number, letter, section, source,
//!         UNIQUE(job_role_id, question_number))
//! ```
//!
//! Contests and job roles are upserted on their natural keys. Storing a job
//! role replaces its answer rows in the same transaction, so the stored key
//! always matches the latest run and its exam kind.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::classify::ExamKind;
use crate::config::MergePolicy;
use crate::coordinator::ExtractedAnswerKey;
use crate::error::Result;
use crate::exhibit::{AnswerEntry, ExhibitSet};
use crate::observation::{ExamSection, StrategyKind};

use super::{AnswerKeySink, JobRoleKey, StoredAnswerKey};

/// Answer-key store backed by a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        Self::create_schema(&conn)?;
        Ok(Self { conn })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS contests (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS job_roles (
                id INTEGER PRIMARY KEY,
                contest_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                exam_kind TEXT NOT NULL,
                FOREIGN KEY (contest_id) REFERENCES contests(id),
                UNIQUE(contest_id, name)
            );

            CREATE TABLE IF NOT EXISTS answers (
                id INTEGER PRIMARY KEY,
                job_role_id INTEGER NOT NULL,
                question_number INTEGER NOT NULL,
                letter TEXT NOT NULL,
                section TEXT NOT NULL,
                source TEXT NOT NULL,
                FOREIGN KEY (job_role_id) REFERENCES job_roles(id),
                UNIQUE(job_role_id, question_number)
            );
            "#,
        )?;
        Ok(())
    }

    /// Read back the stored key of a job role, if any.
    pub fn load_answers(&self, key: &JobRoleKey) -> Result<Option<StoredAnswerKey>> {
        let role: Option<(i64, String)> = self
            .conn
            .query_row(
                r#"SELECT job_roles.id, job_roles.exam_kind
                   FROM job_roles JOIN contests ON contests.id = job_roles.contest_id
                   WHERE contests.name = ?1 AND job_roles.name = ?2"#,
                params![key.contest, key.job_role],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((role_id, kind_label)) = role else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT question_number, letter, section, source FROM answers
             WHERE job_role_id = ?1 ORDER BY question_number",
        )?;
        let rows = stmt.query_map(params![role_id], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut answers = ExhibitSet::new();
        for row in rows {
            let (question, letter, section, source) = row?;
            let entry = match decode_entry(&letter, &section, &source) {
                Some(entry) => entry,
                None => {
                    log::warn!("{}: skipping unreadable answer row for question {}", key, question);
                    continue;
                },
            };
            answers.merge(question, entry, MergePolicy::LastWriteWins);
        }

        let kind = ExamKind::from_label(&kind_label).unwrap_or_else(|| {
            log::warn!("{}: unknown exam kind '{}', reclassifying", key, kind_label);
            answers.classify()
        });

        Ok(Some(StoredAnswerKey { kind, answers }))
    }

    /// Number of answer rows stored for a job role.
    pub fn count_answers(&self, key: &JobRoleKey) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            r#"SELECT COUNT(*)
               FROM answers
               JOIN job_roles ON job_roles.id = answers.job_role_id
               JOIN contests ON contests.id = job_roles.contest_id
               WHERE contests.name = ?1 AND job_roles.name = ?2"#,
            params![key.contest, key.job_role],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn decode_entry(letter: &str, section: &str, source: &str) -> Option<AnswerEntry> {
    let mut chars = letter.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(AnswerEntry {
        letter,
        section: ExamSection::from_label(section)?,
        source: StrategyKind::from_label(source)?,
    })
}

impl AnswerKeySink for SqliteStore {
    fn store(&mut self, key: &JobRoleKey, answers: &ExtractedAnswerKey) -> Result<usize> {
        if answers.is_empty() {
            log::warn!("{}: empty answer key, nothing stored", key);
            return Ok(0);
        }

        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO contests (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![key.contest],
        )?;
        let contest_id: i64 = tx.query_row(
            "SELECT id FROM contests WHERE name = ?1",
            params![key.contest],
            |row| row.get(0),
        )?;

        tx.execute(
            r#"INSERT INTO job_roles (contest_id, name, exam_kind) VALUES (?1, ?2, ?3)
               ON CONFLICT(contest_id, name) DO UPDATE SET
                   exam_kind = excluded.exam_kind"#,
            params![contest_id, key.job_role, answers.kind.label()],
        )?;
        let role_id: i64 = tx.query_row(
            "SELECT id FROM job_roles WHERE contest_id = ?1 AND name = ?2",
            params![contest_id, key.job_role],
            |row| row.get(0),
        )?;

        let stale = tx.execute("DELETE FROM answers WHERE job_role_id = ?1", params![role_id])?;
        if stale > 0 {
            log::debug!("{}: replacing {} stored answer(s)", key, stale);
        }

        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO answers (job_role_id, question_number, letter, section, source)
                   VALUES (?1, ?2, ?3, ?4, ?5)
                   ON CONFLICT(job_role_id, question_number) DO UPDATE SET
                       letter = excluded.letter,
                       section = excluded.section,
                       source = excluded.source"#,
            )?;
            for (question, entry) in &answers.answers {
                written += stmt.execute(params![
                    role_id,
                    question,
                    entry.letter.to_string(),
                    entry.section.as_str(),
                    entry.source.as_str(),
                ])?;
            }
        }

        tx.commit()?;
        log::info!("{}: stored {} answer(s) as {}", key, written, answers.kind);
        Ok(written)
    }
}
