use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use super::error::StorageError;
use crate::model::{Profile, ProfileDraft};

/// File name of the persisted profile collection.
const PROFILES_FILE: &str = "profiles.json";

/// Directory (inside the store root) holding copied profile pictures.
const PICTURES_DIR: &str = "pictures";

/// Manages the JSON-backed profile collection.
///
/// The whole collection lives in a single `profiles.json` file holding a JSON
/// array; every append reads the array, pushes the new record, and rewrites
/// the file wholesale. Accepted profile pictures are copied into a sibling
/// `pictures/` directory so records stay valid across restarts.
pub struct ProfileStore {
    base_path: PathBuf,
}

impl ProfileStore {
    /// Creates a store rooted at the XDG data directory.
    ///
    /// The store directory (`~/.local/share/intake/`) and its pictures
    /// subdirectory are created if they do not already exist.
    pub fn new() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Self::with_path(data_dir.join("intake"))
    }

    /// Creates a store rooted at the given path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = path.into();
        fs::create_dir_all(base_path.join(PICTURES_DIR))?;
        Ok(Self { base_path })
    }

    /// Returns the path of the profile collection file.
    pub fn profiles_path(&self) -> PathBuf {
        self.base_path.join(PROFILES_FILE)
    }

    /// Returns the path of a stored picture by file name.
    pub fn picture_path(&self, name: &str) -> PathBuf {
        self.base_path.join(PICTURES_DIR).join(name)
    }

    /// Loads the persisted collection.
    ///
    /// A missing file is an empty collection; a file that exists but cannot
    /// be parsed is a [`StorageError::Json`].
    pub fn load_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let path = self.profiles_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&path)?;
        let profiles = serde_json::from_reader(file)?;
        Ok(profiles)
    }

    /// Appends a validated draft to the collection.
    ///
    /// Assigns `id = existing count + 1`, copies the picture into the store,
    /// and rewrites the collection file wholesale. The record is only
    /// written if the picture copy succeeded. Returns the stored profile.
    ///
    /// The read-modify-write is not atomic against another process writing
    /// the same file; last writer wins.
    pub fn append_profile(&self, draft: ProfileDraft) -> Result<Profile, StorageError> {
        let mut profiles = self.load_profiles()?;
        let id = profiles.len() as u64 + 1;

        let picture = self.store_picture(id, &draft)?;
        let profile = Profile {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            dob: draft.dob,
            city: draft.city,
            district: draft.district,
            province: draft.province,
            country: draft.country,
            picture,
            created_at: Utc::now(),
        };

        profiles.push(profile.clone());
        let file = fs::File::create(self.profiles_path())?;
        serde_json::to_writer(file, &profiles)?;

        Ok(profile)
    }

    /// Copies the draft's picture into the pictures directory as `<id>.png`,
    /// returning the stored file name.
    fn store_picture(&self, id: u64, draft: &ProfileDraft) -> Result<String, StorageError> {
        let name = format!("{id}.png");
        fs::copy(&draft.picture.path, self.picture_path(&name))?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use quickcheck_macros::quickcheck;
    use tempfile::tempdir;

    use super::*;
    use crate::model::{PictureFile, Province};

    fn make_store() -> (tempfile::TempDir, ProfileStore) {
        let dir = tempdir().unwrap();
        let store = ProfileStore::with_path(dir.path().join("store")).unwrap();
        (dir, store)
    }

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"\x89PNG\r\n\x1a\nfake image bytes").unwrap();
        path
    }

    fn make_draft(picture: PathBuf) -> ProfileDraft {
        ProfileDraft::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "9841000000".to_string(),
            "1990-01-15".to_string(),
            "Kathmandu".to_string(),
            "Kathmandu".to_string(),
            Province::P3,
            "Nepal".to_string(),
            PictureFile::from_path(picture),
        )
        .unwrap()
    }

    // --- load ---

    #[test]
    fn missing_file_loads_as_empty() {
        let (_dir, store) = make_store();
        assert_eq!(store.load_profiles().unwrap().len(), 0);
    }

    #[test]
    fn corrupt_file_returns_json_error() {
        let (_dir, store) = make_store();
        fs::write(store.profiles_path(), "{not valid json").unwrap();
        let result = store.load_profiles();
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    // --- append ---

    #[test]
    fn append_adds_one_record() {
        let (dir, store) = make_store();
        let png = write_png(dir.path(), "alice.png");

        let profile = store.append_profile(make_draft(png)).unwrap();
        assert_eq!(profile.id, 1);
        assert_eq!(profile.name, "Alice");

        let loaded = store.load_profiles().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], profile);
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let (dir, store) = make_store();
        let png = write_png(dir.path(), "alice.png");

        let first = store.append_profile(make_draft(png.clone())).unwrap();
        let second = store.append_profile(make_draft(png.clone())).unwrap();
        let third = store.append_profile(make_draft(png)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[test]
    fn append_copies_picture_bytes() {
        let (dir, store) = make_store();
        let png = write_png(dir.path(), "alice.png");

        let profile = store.append_profile(make_draft(png.clone())).unwrap();
        assert_eq!(profile.picture, "1.png");

        let stored = fs::read(store.picture_path(&profile.picture)).unwrap();
        let original = fs::read(&png).unwrap();
        assert_eq!(stored, original);
    }

    #[test]
    fn append_with_missing_picture_source_fails_and_persists_nothing() {
        let (dir, store) = make_store();
        let missing = dir.path().join("nope.png");

        let result = store.append_profile(make_draft(missing));
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(store.load_profiles().unwrap().len(), 0);
    }

    #[test]
    fn append_rewrites_file_wholesale() {
        let (dir, store) = make_store();
        let png = write_png(dir.path(), "alice.png");
        store.append_profile(make_draft(png.clone())).unwrap();
        store.append_profile(make_draft(png)).unwrap();

        // The file must be one JSON array containing both records, not a
        // concatenation of writes.
        let text = fs::read_to_string(store.profiles_path()).unwrap();
        let parsed: Vec<Profile> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn append_propagates_corrupt_collection_error() {
        let (dir, store) = make_store();
        fs::write(store.profiles_path(), "[{\"bad\":").unwrap();
        let png = write_png(dir.path(), "alice.png");

        let result = store.append_profile(make_draft(png));
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[quickcheck]
    fn append_n_yields_n_records(n: u8) -> bool {
        let n = n.min(10) as usize;
        let (dir, store) = make_store();
        let png = write_png(dir.path(), "pic.png");

        for _ in 0..n {
            store.append_profile(make_draft(png.clone())).unwrap();
        }
        store.load_profiles().unwrap().len() == n
    }

    // --- construction ---

    #[test]
    fn with_path_creates_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = ProfileStore::with_path(&nested).unwrap();
        assert!(nested.exists());
        assert!(store.picture_path("x.png").parent().unwrap().exists());
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let (dir, store) = make_store();
        let png = write_png(dir.path(), "alice.png");
        let saved = store.append_profile(make_draft(png)).unwrap();

        let loaded = store.load_profiles().unwrap();
        assert_eq!(loaded[0].email, "alice@example.com");
        assert_eq!(loaded[0].phone, "9841000000");
        assert_eq!(loaded[0].dob, "1990-01-15");
        assert_eq!(loaded[0].province, Province::P3);
        assert_eq!(loaded[0].country, "Nepal");
        assert_eq!(loaded[0].created_at, saved.created_at);
    }
}
