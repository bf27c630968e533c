/// Maximum number of right imagers the record can describe (two on a
/// multi-baseline unit).
pub const MAX_NUM_INTRINSICS_RIGHT: usize = 2;

/// Maximum number of native resolutions of the third (color) camera.
pub const MAX_NUM_INTRINSICS_THIRD: usize = 3;

/// Maximum number of native resolutions of the platform camera.
pub const MAX_NUM_INTRINSICS_PLATFORM: usize = 4;

/// Maximum number of rectified left-right resolution modes.
pub const MAX_NUM_RECTIFIED_MODES_LR: usize = 4;

/// Maximum number of rectified third camera resolution modes.
pub const MAX_NUM_RECTIFIED_MODES_THIRD: usize = 3;

/// Maximum number of rectified platform camera resolution modes.
pub const MAX_NUM_RECTIFIED_MODES_PLATFORM: usize = 1;

/// Intrinsic parameters of an unrectified imager.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibIntrinsicsNonRectified {
    /// The focal length in the x direction
    pub fx: f32,
    /// The focal length in the y direction
    pub fy: f32,
    /// The x coordinate of the principal point
    pub px: f32,
    /// The y coordinate of the principal point
    pub py: f32,
    /// Distortion coefficients
    pub k: [f32; 5],
    /// Image width in pixels
    pub w: u32,
    /// Image height in pixels
    pub h: u32,
}

/// Intrinsic parameters of a rectified stream.
///
/// Rectification removes distortion, so only the pinhole parameters remain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibIntrinsicsRectified {
    /// The rectified focal length in the x direction
    pub rfx: f32,
    /// The rectified focal length in the y direction
    pub rfy: f32,
    /// The x coordinate of the rectified principal point
    pub rpx: f32,
    /// The y coordinate of the rectified principal point
    pub rpy: f32,
    /// Rectified image width in pixels
    pub rw: u32,
    /// Rectified image height in pixels
    pub rh: u32,
}

/// One depth module calibration table.
///
/// Holds the intrinsics of every physical imager (left, right, third,
/// platform), the rectified mode tables for each supported resolution
/// combination, and the rotations and translations relating the imagers.
/// Array sections are fixed-capacity; the `num_*` count fields say how many
/// leading entries are populated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibRectParameters {
    /// Calibration table layout version
    pub version: u32,
    /// Number of populated right imager intrinsics
    pub num_intrinsics_right: u32,
    /// Number of populated third camera intrinsics
    pub num_intrinsics_third: u32,
    /// Number of populated platform camera intrinsics
    pub num_intrinsics_platform: u32,
    /// Number of populated rectified left-right modes
    pub num_rectified_modes_lr: u32,
    /// Number of populated rectified third camera modes
    pub num_rectified_modes_third: u32,
    /// Number of populated rectified platform camera modes
    pub num_rectified_modes_platform: u32,
    /// Left imager intrinsics (always exactly one)
    pub intrinsics_left: CalibIntrinsicsNonRectified,
    /// Right imager intrinsics, one per right imager
    pub intrinsics_right: [CalibIntrinsicsNonRectified; MAX_NUM_INTRINSICS_RIGHT],
    /// Third camera intrinsics, one per native resolution
    pub intrinsics_third: [CalibIntrinsicsNonRectified; MAX_NUM_INTRINSICS_THIRD],
    /// Platform camera intrinsics, one per native resolution
    pub intrinsics_platform: [CalibIntrinsicsNonRectified; MAX_NUM_INTRINSICS_PLATFORM],
    /// Rectified left-right modes, indexed by right imager then mode
    pub modes_lr:
        [[CalibIntrinsicsRectified; MAX_NUM_RECTIFIED_MODES_LR]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rectified third camera modes, indexed by right imager, third
    /// resolution, then mode
    pub modes_third: [[[CalibIntrinsicsRectified; MAX_NUM_RECTIFIED_MODES_THIRD];
        MAX_NUM_INTRINSICS_THIRD]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rectified platform camera modes, indexed by right imager, platform
    /// resolution, then mode
    pub modes_platform: [[[CalibIntrinsicsRectified; MAX_NUM_RECTIFIED_MODES_PLATFORM];
        MAX_NUM_INTRINSICS_PLATFORM]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rotation of the left imager into the rectified frame, one per right
    /// imager
    pub r_left: [[[f32; 3]; 3]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rotation of the right imager into the rectified frame, one per right
    /// imager
    pub r_right: [[[f32; 3]; 3]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rotation of the third camera into the rectified frame, one per right
    /// imager
    pub r_third: [[[f32; 3]; 3]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rotation of the platform camera into the rectified frame, one per
    /// right imager
    pub r_platform: [[[f32; 3]; 3]; MAX_NUM_INTRINSICS_RIGHT],
    /// Stereo baseline in millimeters, one per right imager
    pub b: [f32; MAX_NUM_INTRINSICS_RIGHT],
    /// Translation of the third camera relative to the left imager, one per
    /// right imager
    pub t: [[f32; 3]; MAX_NUM_INTRINSICS_RIGHT],
    /// Translation of the platform camera relative to the left imager, one
    /// per right imager
    pub t_platform: [[f32; 3]; MAX_NUM_INTRINSICS_RIGHT],
    /// Rotation of the module into the world frame
    pub r_world: [[f32; 3]; 3],
}
