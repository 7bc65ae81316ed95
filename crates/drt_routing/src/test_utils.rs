use crate::{
    schedule_time::ScheduleTime,
    stop::{StopRequest, StopType},
};

pub fn create_stop(id: &str, latitude: f64, longitude: f64) -> StopRequest {
    StopRequest {
        stop_id: id.to_string(),
        stop_name: format!("Stop {}", id),
        latitude,
        longitude,
        stop_type: StopType::Pickup,
        reservation_id: None,
    }
}

/// 福富支所前, 下之谷, 道の駅前
pub fn fukutomi_stops() -> Vec<StopRequest> {
    vec![
        create_stop("fukutomi-branch", 34.5365, 132.7776),
        create_stop("shimonotani", 34.5341, 132.7532),
        create_stop("michi-no-eki", 34.5330, 132.7750),
    ]
}

pub fn start_time() -> ScheduleTime {
    "2026-02-05T08:00:00+09:00".parse().unwrap()
}
