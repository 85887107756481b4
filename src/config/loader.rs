//! Load resource definitions (built-in table or JSON file) and settings from env.

use crate::config::resolved::{ResolvedModel, ResolvedResource, ResourceMessages};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MOVIE_FIELDS: &[&str] = &[
    "title",
    "description",
    "genre",
    "releaseYear",
    "director",
    "duration",
    "rating",
    "posterUrl",
    "trailerUrl",
    "cast",
    "language",
    "country",
    "addedDate",
    "views",
    "isPopular",
    "copyrightStatus",
];

const COMMENT_FIELDS: &[&str] = &["movieTitle", "user", "text", "rating", "createdAt", "likes"];

const USER_FIELDS: &[&str] = &["name", "email", "profilePicture", "createdAt", "updatedAt"];

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The four collections served by default.
pub fn builtin_resources() -> FullConfig {
    let mut popular_fields = vec!["movieId".to_string()];
    popular_fields.extend(fields(MOVIE_FIELDS));

    FullConfig {
        resources: vec![
            ResourceConfig {
                path_segment: "movies".into(),
                collection: "movies".into(),
                label: "Movie".into(),
                plural_label: "movies".into(),
                required_fields: fields(MOVIE_FIELDS),
                created_message: None,
                tag: Some("Movies".into()),
            },
            ResourceConfig {
                path_segment: "most-popular".into(),
                collection: "mostpopular".into(),
                label: "Movie".into(),
                plural_label: "movies".into(),
                required_fields: popular_fields,
                created_message: Some("Movie added to most popular".into()),
                tag: Some("MostPopular".into()),
            },
            ResourceConfig {
                path_segment: "comments".into(),
                collection: "comments".into(),
                label: "Comment".into(),
                plural_label: "comments".into(),
                required_fields: fields(COMMENT_FIELDS),
                created_message: None,
                tag: Some("Comments".into()),
            },
            ResourceConfig {
                path_segment: "users".into(),
                collection: "users".into(),
                label: "User".into(),
                plural_label: "users".into(),
                required_fields: fields(USER_FIELDS),
                created_message: None,
                tag: Some("Users".into()),
            },
        ],
    }
}

/// Read a JSON array of resource definitions (snake_case keys, see [`ResourceConfig`]).
pub async fn load_resources_from_path(path: &Path) -> Result<FullConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let resources: Vec<ResourceConfig> =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    Ok(FullConfig { resources })
}

/// Build resolved model from full config (validates first).
pub fn resolve(config: &FullConfig) -> Result<ResolvedModel, ConfigError> {
    validate(config)?;

    let mut resources = Vec::with_capacity(config.resources.len());
    for rc in &config.resources {
        let resource = Arc::new(ResolvedResource {
            path_segment: rc.path_segment.clone(),
            collection: rc.collection.clone(),
            label: rc.label.clone(),
            plural_label: rc.plural_label.clone(),
            tag: rc.tag.clone().unwrap_or_else(|| capitalize(&rc.plural_label)),
            required_fields: rc.required_fields.clone(),
            messages: messages_for(rc),
        });
        resources.push(resource);
    }

    Ok(ResolvedModel { resources })
}

fn messages_for(rc: &ResourceConfig) -> ResourceMessages {
    let singular = rc.label.to_lowercase();
    ResourceMessages {
        not_found: format!("{} not found", rc.label),
        invalid_id: format!("Invalid {} ID format", singular),
        created: rc
            .created_message
            .clone()
            .unwrap_or_else(|| format!("{} added successfully", rc.label)),
        list_failed: format!("Error retrieving {}", rc.plural_label),
        read_failed: format!("Error retrieving {}", singular),
        create_failed: format!("Error adding {}", singular),
        update_failed: format!("Error updating {}", singular),
        delete_failed: format!("Error deleting {}", singular),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Settings {
    /// Read settings from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset or empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();

        let port = match get("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidSetting {
                name: "PORT",
                reason: p.clone(),
            })?,
            None => defaults.port,
        };
        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(n) => n.parse().map_err(|_| ConfigError::InvalidSetting {
                name: "BODY_LIMIT_BYTES",
                reason: n.clone(),
            })?,
            None => defaults.body_limit_bytes,
        };
        let storage = match get("STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => defaults.storage,
        };
        let mongo_uri = get("MONGO_DB_CONNECTION_STRING");
        if storage == StorageBackend::MongoDb && mongo_uri.is_none() {
            return Err(ConfigError::MissingSetting("MONGO_DB_CONNECTION_STRING"));
        }

        Ok(Settings {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            storage,
            mongo_uri,
            mongo_db_name: get("MONGO_DB_NAME").unwrap_or(defaults.mongo_db_name),
            watchlist_path: get("WATCHLIST_PATH").map(PathBuf::from).unwrap_or(defaults.watchlist_path),
            resources_path: get("RESOURCES_PATH").map(PathBuf::from),
            body_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn by_path<'a>(model: &'a ResolvedModel, segment: &str) -> &'a ResolvedResource {
        model
            .resources
            .iter()
            .find(|r| r.path_segment == segment)
            .unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn resolves_builtin_messages() {
        let model = resolve(&builtin_resources()).unwrap();
        assert_eq!(model.resources.len(), 4);

        let movies = by_path(&model, "movies");
        assert_eq!(movies.messages.not_found, "Movie not found");
        assert_eq!(movies.messages.invalid_id, "Invalid movie ID format");
        assert_eq!(movies.messages.created, "Movie added successfully");
        assert_eq!(movies.messages.list_failed, "Error retrieving movies");
        assert_eq!(movies.messages.read_failed, "Error retrieving movie");
        assert_eq!(movies.required_fields.len(), 16);

        let popular = by_path(&model, "most-popular");
        assert_eq!(popular.collection, "mostpopular");
        assert_eq!(popular.required_fields[0], "movieId");
        assert_eq!(popular.required_fields.len(), 17);
        assert_eq!(popular.messages.created, "Movie added to most popular");

        let users = by_path(&model, "users");
        assert_eq!(users.messages.not_found, "User not found");
        assert_eq!(users.messages.delete_failed, "Error deleting user");
    }

    #[test]
    fn tag_defaults_to_capitalized_plural() {
        let mut config = builtin_resources();
        config.resources[2].tag = None;
        let model = resolve(&config).unwrap();
        assert_eq!(by_path(&model, "comments").tag, "Comments");
    }

    #[test]
    fn settings_defaults_for_memory_backend() {
        let settings = Settings::from_lookup(env(&[("STORAGE_BACKEND", "memory")])).unwrap();
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
        assert_eq!(settings.mongo_db_name, "yourMovies");
        assert_eq!(settings.watchlist_path, PathBuf::from("db/watchlist.json"));
        assert!(settings.resources_path.is_none());
    }

    #[test]
    fn settings_require_mongo_uri_by_default() {
        assert!(matches!(
            Settings::from_lookup(env(&[])),
            Err(ConfigError::MissingSetting("MONGO_DB_CONNECTION_STRING"))
        ));
        let settings = Settings::from_lookup(env(&[
            ("MONGO_DB_CONNECTION_STRING", "mongodb://localhost:27017"),
            ("PORT", "8080"),
            ("MONGO_DB_NAME", "films"),
        ]))
        .unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.mongo_db_name, "films");
    }

    #[test]
    fn settings_reject_garbage() {
        assert!(Settings::from_lookup(env(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")])).is_err());
        assert!(Settings::from_lookup(env(&[("STORAGE_BACKEND", "sqlite")])).is_err());
    }

    #[tokio::test]
    async fn loads_resources_from_json_file() {
        let path = std::env::temp_dir().join(format!("movies-api-resources-{}.json", uuid::Uuid::new_v4()));
        let body = serde_json::to_string(&builtin_resources().resources).unwrap();
        tokio::fs::write(&path, body).await.unwrap();
        let config = load_resources_from_path(&path).await.unwrap();
        assert_eq!(config.resources.len(), 4);
        let _ = tokio::fs::remove_file(&path).await;

        assert!(load_resources_from_path(&path).await.is_err());
    }

    #[tokio::test]
    async fn resources_file_uses_snake_case_keys() {
        let path = std::env::temp_dir().join(format!("movies-api-resources-{}.json", uuid::Uuid::new_v4()));
        let snake = r#"[{"path_segment":"series","collection":"series","label":"Series",
            "plural_label":"series","required_fields":["title"]}]"#;
        tokio::fs::write(&path, snake).await.unwrap();
        let config = load_resources_from_path(&path).await.unwrap();
        assert_eq!(config.resources[0].path_segment, "series");
        assert_eq!(config.resources[0].required_fields, vec!["title".to_string()]);

        let camel = r#"[{"pathSegment":"series","collection":"series","label":"Series",
            "pluralLabel":"series","requiredFields":["title"]}]"#;
        tokio::fs::write(&path, camel).await.unwrap();
        assert!(matches!(load_resources_from_path(&path).await, Err(ConfigError::Load(_))));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
