pub mod json_api;

pub use json_api::{
    draw_order_json, spin_wheel_json, DrawEntry, DrawResponse, SpinRequest, SpinResponse,
    SCHEMA_VERSION,
};
