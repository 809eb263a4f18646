use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// `booking_<毫秒時間戳>_<9 碼 base36>`
pub fn generate_booking_id() -> String {
    format!("booking_{}_{}", Utc::now().timestamp_millis(), random_suffix())
}

/// 對話與訊息共用: `<毫秒時間戳><9 碼 base36>`
pub fn generate_id() -> String {
    format!("{}{}", Utc::now().timestamp_millis(), random_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_shape() {
        let id = generate_booking_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "booking");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(generate_id(), generate_id());
    }
}
