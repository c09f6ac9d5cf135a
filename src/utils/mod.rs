pub mod logging;

use bytes::Bytes;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate `size` bytes of random alphanumeric content.
pub fn random_alphanumeric_payload(size: usize) -> Bytes {
    let data: Vec<u8> = rand::thread_rng().sample_iter(&Alphanumeric).take(size).collect();
    Bytes::from(data)
}
