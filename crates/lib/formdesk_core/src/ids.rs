// Identity generation for records created by the in-process backend.
//
// The REST API assigns `_id` itself; only `MemoryBackend` needs to mint
// identities. UUIDv7 keeps them sortable by creation time, which matches
// the insertion order the builder relies on.

use uuid::Uuid;

/// Generate a new record identity as a UUIDv7 string.
pub fn new_record_id() -> String {
    Uuid::now_v7().simple().to_string()
}
