// src/consts.rs
//! Shared constants — envelope geometry, reserved names and defaults

/// Nonce length in bytes (one AES block; GCM derives its counter via GHASH)
pub const NONCE_LEN: usize = 16;

/// Authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// Fixed envelope header: nonce ‖ tag
pub const HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

/// Reserved stem of the check-marker file
pub const CHECK_MARKER_NAME: &str = "check";

/// Plaintext sealed inside the check marker
pub const CHECK_PLAINTEXT: &[u8] = b"OK";

/// Default suffix for entry files: `<name>.secret`
pub const DEFAULT_ENTRY_SUFFIX: &str = "secret";

/// Default suffix for the marker file: `check.check`
pub const DEFAULT_MARKER_SUFFIX: &str = "check";

/// Prefix of in-flight staging files; never a valid entry name
pub const STAGING_PREFIX: &str = ".staging-";

/// Suffix of in-flight staging files
pub const STAGING_SUFFIX: &str = ".tmp";

/// Hex characters of the BLAKE3 key fingerprint shown in logs
pub const FINGERPRINT_LEN_HEX: usize = 16;

/// Environment variable naming the TOML config file
pub const ENV_CONFIG: &str = "ESS_CONFIG";

/// Environment variable overriding `paths.store_dir`
pub const ENV_STORE_DIR: &str = "ESS_STORE_DIR";

/// Config file looked up in the working directory when `ESS_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "secret-store.toml";
