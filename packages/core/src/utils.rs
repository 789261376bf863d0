// ABOUTME: Shared utility functions for Folio
// ABOUTME: Surrogate ID generation for projects

use rand::Rng;

/// Generate a unique project ID (8 alphanumeric characters)
pub fn generate_project_id() -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
