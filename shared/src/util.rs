//! Id and clock helpers

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Custom epoch: 2024-01-01 00:00:00 UTC
const EPOCH_MS: i64 = 1_704_067_200_000;

/// Snowflake-style id for client-side records (order lines).
///
/// 41 bits of milliseconds since the 2024 epoch followed by 12 random bits,
/// so ids stay below 2^53 and survive a round trip through JSON numbers.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000);
    (ts << 12) | rand_bits
}

/// Snowflake id strictly greater than `last`
///
/// Two ids drawn in the same millisecond may otherwise collide or go
/// backwards.
pub fn snowflake_after(last: i64) -> i64 {
    snowflake_id().max(last.saturating_add(1))
}
