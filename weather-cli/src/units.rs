//! Display-time temperature conversion. Records stay in Celsius internally.

pub fn c_to_f(celsius: i32) -> i32 {
    (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32
}
