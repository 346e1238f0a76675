//! Database driver selection and `.env` connection settings

use super::patcher::{regex_replace_in_file, replace_in_file, replace_many_in_file};
use crate::error::{InstallerError, Result};
use crate::runtime::PhpRuntime;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Environment files that carry the connection settings
pub const ENV_FILES: &[&str] = &[".env", ".env.example"];

/// Supported database drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Sqlite,
    Mysql,
    Mariadb,
    Pgsql,
    Sqlsrv,
}

impl Database {
    /// Every driver, in menu order
    pub const ALL: [Database; 5] = [
        Database::Sqlite,
        Database::Mysql,
        Database::Mariadb,
        Database::Pgsql,
        Database::Sqlsrv,
    ];

    /// Value written to `DB_CONNECTION`
    pub fn driver(&self) -> &'static str {
        match self {
            Database::Sqlite => "sqlite",
            Database::Mysql => "mysql",
            Database::Mariadb => "mariadb",
            Database::Pgsql => "pgsql",
            Database::Sqlsrv => "sqlsrv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Database::Sqlite => "SQLite",
            Database::Mysql => "MySQL",
            Database::Mariadb => "MariaDB",
            Database::Pgsql => "PostgreSQL",
            Database::Sqlsrv => "SQL Server",
        }
    }

    /// PDO extension the driver needs
    pub fn pdo_extension(&self) -> &'static str {
        match self {
            Database::Sqlite => "pdo_sqlite",
            Database::Mysql | Database::Mariadb => "pdo_mysql",
            Database::Pgsql => "pdo_pgsql",
            Database::Sqlsrv => "pdo_sqlsrv",
        }
    }

    /// Port replacing the skeleton's MySQL default, if different
    pub fn default_port(&self) -> Option<&'static str> {
        match self {
            Database::Pgsql => Some("5432"),
            Database::Sqlsrv => Some("1433"),
            _ => None,
        }
    }

    fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(Database::driver)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.driver())
    }
}

impl FromStr for Database {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|db| db.driver() == s)
            .ok_or_else(|| {
                InstallerError::precondition(format!(
                    "Invalid database driver [{}]. Possible values are: {}.",
                    s,
                    Database::valid_values()
                ))
            })
    }
}

/// Menu entries: drivers whose PDO extension is loaded first, the rest
/// labelled as missing it. Order is otherwise stable.
pub fn database_options(php: &PhpRuntime) -> Vec<(Database, String)> {
    let mut options: Vec<(Database, bool)> = Database::ALL
        .iter()
        .map(|db| (*db, php.has_extension(db.pdo_extension())))
        .collect();
    options.sort_by_key(|(_, available)| !available);

    options
        .into_iter()
        .map(|(db, available)| {
            let label = if available {
                db.display_name().to_string()
            } else {
                format!("{} (Missing PDO extension)", db.display_name())
            };
            (db, label)
        })
        .collect()
}

/// `DB_DATABASE` value derived from the project name
pub fn database_name(project: &str) -> String {
    project.to_lowercase().replace('-', "_")
}

/// Connection lines the skeleton ships uncommented for MySQL
fn connection_defaults(marker: &str) -> Vec<String> {
    vec![
        "DB_HOST=127.0.0.1".to_string(),
        "DB_PORT=3306".to_string(),
        format!("DB_DATABASE={}", marker),
        "DB_USERNAME=root".to_string(),
        "DB_PASSWORD=".to_string(),
    ]
}

fn replace_in_env_files(dir: &Path, pairs: &[(&str, &str)]) -> Result<()> {
    for file in ENV_FILES {
        replace_many_in_file(pairs, &dir.join(file))?;
    }
    Ok(())
}

/// Point the generated `.env` files at `database`.
///
/// `marker` is the skeleton's placeholder database name.
pub fn configure_default_connection(
    dir: &Path,
    database: Database,
    project: &str,
    marker: &str,
) -> Result<()> {
    let connection = format!("DB_CONNECTION={}", database.driver());
    for file in ENV_FILES {
        regex_replace_in_file(r"DB_CONNECTION=.*", &connection, &dir.join(file))?;
    }

    let defaults = connection_defaults(marker);

    if database == Database::Sqlite {
        let env = std::fs::read_to_string(dir.join(ENV_FILES[0]))?;
        if !env.contains("# DB_HOST=127.0.0.1") {
            let commented: Vec<String> = defaults.iter().map(|d| format!("# {}", d)).collect();
            let pairs: Vec<(&str, &str)> = defaults
                .iter()
                .map(String::as_str)
                .zip(commented.iter().map(String::as_str))
                .collect();
            replace_in_env_files(dir, &pairs)?;
        }
        return Ok(());
    }

    let commented: Vec<String> = defaults.iter().map(|d| format!("# {}", d)).collect();
    let pairs: Vec<(&str, &str)> = commented
        .iter()
        .map(String::as_str)
        .zip(defaults.iter().map(String::as_str))
        .collect();
    replace_in_env_files(dir, &pairs)?;

    if let Some(port) = database.default_port() {
        let port_line = format!("DB_PORT={}", port);
        for file in ENV_FILES {
            replace_in_file("DB_PORT=3306", &port_line, &dir.join(file))?;
        }
    }

    let name_line = format!("DB_DATABASE={}", database_name(project));
    let marker_line = format!("DB_DATABASE={}", marker);
    for file in ENV_FILES {
        replace_in_file(&marker_line, &name_line, &dir.join(file))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MYSQL_ENV: &str = "APP_NAME=Bot\nDB_CONNECTION=mysql\nDB_HOST=127.0.0.1\nDB_PORT=3306\nDB_DATABASE=laragram\nDB_USERNAME=root\nDB_PASSWORD=\n";
    const SQLITE_ENV: &str = "APP_NAME=Bot\nDB_CONNECTION=sqlite\n# DB_HOST=127.0.0.1\n# DB_PORT=3306\n# DB_DATABASE=laragram\n# DB_USERNAME=root\n# DB_PASSWORD=\n";

    fn project(env: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in ENV_FILES {
            fs::write(dir.path().join(file), env).unwrap();
        }
        dir
    }

    fn read(dir: &tempfile::TempDir, file: &str) -> String {
        fs::read_to_string(dir.path().join(file)).unwrap()
    }

    #[test]
    fn test_parse_database() {
        assert_eq!("pgsql".parse::<Database>().unwrap(), Database::Pgsql);
        let err = "oracle".parse::<Database>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid database driver [oracle]. Possible values are: sqlite, mysql, mariadb, pgsql, sqlsrv."
        );
    }

    #[test]
    fn test_sqlite_comments_connection_settings() {
        let dir = project(MYSQL_ENV);
        configure_default_connection(dir.path(), Database::Sqlite, "my-bot", "laragram").unwrap();

        for file in ENV_FILES {
            let env = read(&dir, file);
            assert!(env.contains("DB_CONNECTION=sqlite"));
            assert!(env.contains("# DB_HOST=127.0.0.1"));
            assert!(env.contains("# DB_DATABASE=laragram"));
            assert!(env.contains("# DB_PASSWORD="));
        }
    }

    #[test]
    fn test_sqlite_keeps_already_commented_settings() {
        let dir = project(SQLITE_ENV);
        configure_default_connection(dir.path(), Database::Sqlite, "my-bot", "laragram").unwrap();
        assert_eq!(read(&dir, ".env"), SQLITE_ENV);
    }

    #[test]
    fn test_pgsql_uncomments_and_sets_port_and_name() {
        let dir = project(SQLITE_ENV);
        configure_default_connection(dir.path(), Database::Pgsql, "My-Bot", "laragram").unwrap();

        for file in ENV_FILES {
            let env = read(&dir, file);
            assert!(env.contains("DB_CONNECTION=pgsql"));
            assert!(env.contains("\nDB_HOST=127.0.0.1"));
            assert!(env.contains("DB_PORT=5432"));
            assert!(env.contains("DB_DATABASE=my_bot"));
            assert!(!env.contains("# DB_"));
        }
    }

    #[test]
    fn test_mysql_keeps_default_port() {
        let dir = project(MYSQL_ENV);
        configure_default_connection(dir.path(), Database::Mariadb, "shop", "laragram").unwrap();

        let env = read(&dir, ".env");
        assert!(env.contains("DB_CONNECTION=mariadb"));
        assert!(env.contains("DB_PORT=3306"));
        assert!(env.contains("DB_DATABASE=shop"));
    }

    #[test]
    fn test_database_options_put_available_drivers_first() {
        let php = PhpRuntime::from_module_list("php", "pdo_pgsql\npdo_sqlite\n");
        let options = database_options(&php);

        let order: Vec<Database> = options.iter().map(|(db, _)| *db).collect();
        assert_eq!(
            order,
            vec![
                Database::Sqlite,
                Database::Pgsql,
                Database::Mysql,
                Database::Mariadb,
                Database::Sqlsrv
            ]
        );
        assert_eq!(options[0].1, "SQLite");
        assert_eq!(options[2].1, "MySQL (Missing PDO extension)");
    }

    #[test]
    fn test_database_name() {
        assert_eq!(database_name("My-Cool-Bot"), "my_cool_bot");
    }
}
