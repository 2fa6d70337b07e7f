use rand::Rng;

/// Length of generated invitation codes.
pub const INVITATION_CODE_LENGTH: usize = 10;

/// Generates an uppercase alphanumeric invitation code.
///
/// `0`, `O`, `1` and `I` are left out so codes can be read aloud and typed back.
pub fn generate_invitation_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    let mut rng = rand::rng();

    (0..INVITATION_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
