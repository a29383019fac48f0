// strut_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::abstractions::{ChassisBody, GroundHit, GroundProbe, TraceRequest};
pub use crate::error::{ConfigError, ConfigResult};
pub use crate::types::{FrameHandle, WheelPose};

// --- Concrete Models ---
pub use crate::models::friction::{FrictionCurve, FrictionCurveParams};
pub use crate::models::wheel::{ContactState, WheelConfig, WheelModel, WheelTickReport};
