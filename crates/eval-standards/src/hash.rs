use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Digest over named files in the given order; names are part of the input so
/// renaming a file changes the fingerprint.
pub fn fingerprint<'a>(files: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> String {
    let mut hasher = Sha256::new();
    for (name, bytes) in files {
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(sha256_hex(bytes).as_bytes());
        hasher.update([b'\n']);
    }
    hex::encode(hasher.finalize())
}
