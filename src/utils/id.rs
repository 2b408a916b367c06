use std::sync::OnceLock;
use uuid::Uuid;

static NODE_ID: OnceLock<[u8; 6]> = OnceLock::new();

/// Random node id, fixed for the lifetime of the process. The multicast bit
/// is set so it can never collide with a real MAC address.
fn node_id() -> &'static [u8; 6] {
    NODE_ID.get_or_init(|| {
        let random = Uuid::new_v4();
        let bytes = random.as_bytes();
        let mut node = [0u8; 6];
        node.copy_from_slice(&bytes[..6]);
        node[0] |= 0x01;
        node
    })
}

/// Generates a time-based (version 1) identifier, e.g. for `mu:uuid`.
pub fn generate_uuid() -> String {
    Uuid::now_v1(node_id()).hyphenated().to_string()
}

/// Generates a random (version 4) identifier.
pub fn generate_uuid_v4() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
