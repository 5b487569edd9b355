pub mod contract;
pub mod dtos;
pub mod error;
pub mod payloads;
pub mod validation;

pub mod endpoints {
    pub const GET_AVAILABLE_PAIRS: &str = "/api/v1/available_pairs";
    pub const POST_PAIR_CANDLES: &str = "/api/v1/pair_candles";
    pub const POST_CANDLE_INFO: &str = "/api/v1/candle_info";
    pub const POST_PUSH_COMBO: &str = "/api/v1/push_combo";
    pub const POST_REMOVE_COMBO: &str = "/api/v1/remove_combo";
    pub const POST_PAIR_HISTORY: &str = "/api/v1/pair_history";
}
