//! User document store with file locking.
//!
//! Each user is persisted as a single JSON document under
//! `<data_dir>/users/<id>.json`. Writes go through a locked temp file and
//! an atomic rename; reads take a shared lock. Appends are a plain
//! read-modify-write of the whole document: concurrent appends to the same
//! user race and the last persist wins. The store does not guard against
//! that race.

use crate::{
    format_date, AppendedExercise, Error, Exercise, NewExercise, Result, User, UserSummary,
};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Durable storage and retrieval of user records
pub struct UserStore {
    root: PathBuf,
}

impl UserStore {
    /// Open a store rooted at the given data directory.
    ///
    /// Creates the document directory if it does not exist yet. The store
    /// is opened once at startup and shared for the process lifetime.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let root = data_dir.into().join("users");
        std::fs::create_dir_all(&root)?;
        tracing::debug!("Opened user store at {:?}", root);
        Ok(Self { root })
    }

    /// Create a new user with an empty log and persist it.
    ///
    /// Usernames are required but not required to be unique. Ids are
    /// random v4 UUIDs and are never reused.
    pub fn create_user(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Validation("username is required".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            log: Vec::new(),
        };
        self.save_document(&user)?;

        tracing::info!("Created user {:?} ({})", user.username, user.id);
        Ok(user)
    }

    /// List all users as `{id, username}` projections, logs omitted.
    ///
    /// Order is store-defined (directory iteration order), not sorted.
    /// Documents that fail to parse are skipped with a warning so one bad
    /// file does not take the listing down.
    pub fn list_users(&self) -> Result<Vec<UserSummary>> {
        let mut users = Vec::new();

        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match self.load_document(&path) {
                Ok(user) => users.push(UserSummary {
                    id: user.id,
                    username: user.username,
                }),
                Err(e) => {
                    tracing::warn!("Skipping unreadable user document {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Listed {} users", users.len());
        Ok(users)
    }

    /// Find a user by id, including the full log.
    ///
    /// Returns `Ok(None)` when no such user exists; a malformed id is an
    /// error rather than a not-found signal.
    pub fn find_user(&self, id_text: &str) -> Result<Option<User>> {
        let id = parse_id(id_text)?;
        let path = self.document_path(id);
        if !path.exists() {
            return Ok(None);
        }
        self.load_document(&path).map(Some)
    }

    /// Append one exercise to a user's log and persist the document.
    ///
    /// The date defaults to today (UTC) when absent. Returns `Ok(None)`
    /// when the user does not exist, otherwise the merged view of the
    /// user and the entry just stored.
    pub fn append_exercise(
        &self,
        id_text: &str,
        exercise: NewExercise,
    ) -> Result<Option<AppendedExercise>> {
        let description = exercise.description.trim();
        if description.is_empty() {
            return Err(Error::Validation("description is required".into()));
        }

        let Some(mut user) = self.find_user(id_text)? else {
            return Ok(None);
        };

        let entry = Exercise {
            description: description.to_string(),
            duration: exercise.duration,
            date: exercise
                .date
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        };
        user.log.push(entry.clone());
        self.save_document(&user)?;

        tracing::debug!(
            "Appended exercise to user {} (log length {})",
            user.id,
            user.log.len()
        );

        Ok(Some(AppendedExercise {
            id: user.id,
            username: user.username,
            description: entry.description,
            duration: entry.duration,
            date: format_date(entry.date),
        }))
    }

    fn document_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Read and parse one user document under a shared lock
    fn load_document(&self, path: &Path) -> Result<User> {
        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read_result = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        serde_json::from_str(&contents)
            .map_err(|e| Error::Storage(format!("corrupt user document {:?}: {}", path, e)))
    }

    /// Write one user document atomically:
    /// 1. Write to a locked temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the destination
    fn save_document(&self, user: &User) -> Result<()> {
        let temp = NamedTempFile::new_in(&self.root)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(user)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(self.document_path(user.id))
            .map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

/// Parse a client-supplied id, surfacing malformed text as an error
fn parse_id(id_text: &str) -> Result<Uuid> {
    Uuid::parse_str(id_text.trim()).map_err(|_| Error::InvalidUserId(id_text.to_string()))
}
