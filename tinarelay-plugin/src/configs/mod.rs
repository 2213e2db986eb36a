mod settings;

pub use settings::{
    AutoPostMeasurements, AutoPostPicture, EventConfig, Logger, Service, Settings, Webcam,
};
