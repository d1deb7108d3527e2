use crate::config::Config;
use crate::device_camera::interface::CameraConfig;
use crate::device_input::interface::UserAction;
use crate::error::Error;
use crate::image_classifier::interface::Prediction;
use crate::result_classifier::{classify, DisplayResult};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Uninitialized,
    Webcam,
    Upload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CameraStatus {
    NotCreated,
    Acquiring,
    Ready { paused: bool, fallback_used: bool },
    Failed { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    ChooseMode,
    PreparingMode,
    CameraStarting,
    CameraStarted,
    DefaultCameraUsed,
    PointCamera,
    CameraUnavailable(String),
    LoadImage,
    ReadingImage,
    ImageLoaded,
    ImageUnreadable(String),
    Classifying,
    PredictionFailed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Display {
    Prompt(Prompt),
    Result(DisplayResult),
}

/// Transient state of the upload flow. Every decode and classification is
/// tagged with a request id; a completion is applied only while its id is
/// the one being waited for.
#[derive(Clone, Debug, Default)]
pub struct UploadState {
    pub pending_image: Option<Arc<DynamicImage>>,
    pub decoding: Option<u64>,
    pub in_flight: Option<u64>,
    pub classify_enabled: bool,
    next_request: u64,
}

impl UploadState {
    fn reset(&mut self) {
        *self = UploadState {
            next_request: self.next_request,
            ..UploadState::default()
        };
    }

    fn take_request_id(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    fn refresh_classify(&mut self) {
        self.classify_enabled =
            self.pending_image.is_some() && self.decoding.is_none() && self.in_flight.is_none();
    }
}

#[derive(Clone, Debug)]
pub struct Ready {
    pub class_names: Vec<String>,
    pub mode: Mode,
    pub camera: CameraStatus,
    /// Bumped on every entry to Webcam mode; tags capture loop results.
    pub activation: u64,
    pub upload: UploadState,
    pub display: Display,
}

#[derive(Clone, Debug)]
pub enum State {
    LoadingModel,
    LoadFailed { message: String },
    Ready(Ready),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraAcquired {
    pub fallback_used: bool,
}

#[derive(Debug)]
pub enum Msg {
    ModelLoadDone(Result<Vec<String>, Error>),
    User(UserAction),
    CameraAcquireDone(Result<CameraAcquired, Error>),
    /// The capture loop for `activation` could not be started.
    CaptureStartFailed {
        activation: u64,
        error: Error,
    },
    WebcamPredictionDone {
        activation: u64,
        result: Result<Vec<Prediction>, Error>,
    },
    ImageDecodeDone {
        request: u64,
        result: Result<Arc<DynamicImage>, Error>,
    },
    UploadPredictionDone {
        request: u64,
        result: Result<Vec<Prediction>, Error>,
    },
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::ImageDecodeDone {
                request,
                result: Ok(image),
            } => format!(
                "ImageDecodeDone {{ request: {}, result: Ok({}x{}) }}",
                request,
                image.width(),
                image.height()
            ),
            msg => format!("{:?}", msg),
        }
    }

    /// Successful capture loop results arrive every frame and are not worth
    /// a log line each.
    pub fn is_routine(&self) -> bool {
        matches!(self, Msg::WebcamPredictionDone { result: Ok(_), .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadModel { model_location: String },
    SubscribeInput,
    AcquireCamera { config: CameraConfig },
    /// Resume the session and (re)start the capture loop.
    StartCapture { activation: u64 },
    /// Stop the capture loop and pause the session, keeping it open.
    StopCapture,
    SetCameraPaused(bool),
    DecodeImage { path: PathBuf, request: u64 },
    PredictUpload { image: Arc<DynamicImage>, request: u64 },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::PredictUpload { request, .. } => {
                format!("PredictUpload {{ request: {} }}", request)
            }
            effect => format!("{:?}", effect),
        }
    }

    /// Effects that may block on a device or the model. The rest only flip
    /// session flags and must run in the order they were emitted.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Effect::LoadModel { .. }
                | Effect::SubscribeInput
                | Effect::AcquireCamera { .. }
                | Effect::DecodeImage { .. }
                | Effect::PredictUpload { .. }
        )
    }
}

pub fn init(config: &Config) -> (State, Vec<Effect>) {
    (
        State::LoadingModel,
        vec![
            Effect::LoadModel {
                model_location: config.model_location.clone(),
            },
            Effect::SubscribeInput,
        ],
    )
}

pub fn transition(config: &Config, state: State, msg: Msg) -> (State, Vec<Effect>) {
    match (state, msg) {
        (State::LoadingModel, Msg::ModelLoadDone(Ok(class_names))) => {
            (State::Ready(Ready::new(class_names)), vec![])
        }
        (State::LoadingModel, Msg::ModelLoadDone(Err(e))) => (
            State::LoadFailed {
                message: e.to_string(),
            },
            vec![],
        ),
        (State::Ready(mut ready), msg) => {
            let effects = ready.update(config, msg);
            (State::Ready(ready), effects)
        }

        // Default case
        (state, _) => (state, vec![]),
    }
}

impl Ready {
    pub fn new(class_names: Vec<String>) -> Self {
        Self {
            class_names,
            mode: Mode::Uninitialized,
            camera: CameraStatus::NotCreated,
            activation: 0,
            upload: UploadState::default(),
            display: Display::Prompt(Prompt::ChooseMode),
        }
    }

    fn update(&mut self, config: &Config, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::User(UserAction::SelectWebcam) => self.select_webcam(config),
            Msg::User(UserAction::SelectUpload) => self.select_upload(),
            Msg::User(UserAction::TogglePause) => self.toggle_pause(),
            Msg::User(UserAction::SelectFile(path)) => self.select_file(path),
            Msg::User(UserAction::Classify) => self.classify_upload(),
            Msg::CameraAcquireDone(result) => self.camera_acquired(result),
            Msg::CaptureStartFailed { activation, error } => {
                self.capture_start_failed(activation, error)
            }
            Msg::WebcamPredictionDone { activation, result } => {
                self.webcam_prediction(config, activation, result)
            }
            Msg::ImageDecodeDone { request, result } => self.image_decoded(request, result),
            Msg::UploadPredictionDone { request, result } => {
                self.upload_prediction(config, request, result)
            }
            // quitting is the runtime's business
            Msg::User(UserAction::Quit) | Msg::ModelLoadDone(_) => vec![],
        }
    }

    fn leave_current_mode(&mut self) -> Vec<Effect> {
        let mut effects = vec![];

        if self.mode == Mode::Webcam {
            if let CameraStatus::Ready { fallback_used, .. } = self.camera {
                self.camera = CameraStatus::Ready {
                    paused: true,
                    fallback_used,
                };
                effects.push(Effect::StopCapture);
            }
        }

        self.upload.reset();
        self.display = Display::Prompt(Prompt::PreparingMode);
        effects
    }

    fn select_webcam(&mut self, config: &Config) -> Vec<Effect> {
        let mut effects = self.leave_current_mode();
        self.mode = Mode::Webcam;
        self.activation += 1;

        match self.camera {
            CameraStatus::NotCreated | CameraStatus::Failed { .. } => {
                self.camera = CameraStatus::Acquiring;
                self.display = Display::Prompt(Prompt::CameraStarting);
                effects.push(Effect::AcquireCamera {
                    config: config.camera.clone(),
                });
            }
            CameraStatus::Acquiring => {
                self.display = Display::Prompt(Prompt::CameraStarting);
            }
            CameraStatus::Ready { fallback_used, .. } => {
                self.camera = CameraStatus::Ready {
                    paused: false,
                    fallback_used,
                };
                self.display = Display::Prompt(Prompt::PointCamera);
                effects.push(Effect::StartCapture {
                    activation: self.activation,
                });
            }
        }

        effects
    }

    fn select_upload(&mut self) -> Vec<Effect> {
        let effects = self.leave_current_mode();
        self.mode = Mode::Upload;
        self.display = Display::Prompt(Prompt::LoadImage);
        effects
    }

    fn toggle_pause(&mut self) -> Vec<Effect> {
        if self.mode != Mode::Webcam {
            return vec![];
        }
        match self.camera {
            CameraStatus::Ready {
                paused,
                fallback_used,
            } => {
                self.camera = CameraStatus::Ready {
                    paused: !paused,
                    fallback_used,
                };
                vec![Effect::SetCameraPaused(!paused)]
            }
            _ => vec![],
        }
    }

    fn camera_acquired(&mut self, result: Result<CameraAcquired, Error>) -> Vec<Effect> {
        if self.camera != CameraStatus::Acquiring {
            return vec![];
        }

        match result {
            Ok(CameraAcquired { fallback_used }) if self.mode == Mode::Webcam => {
                self.camera = CameraStatus::Ready {
                    paused: false,
                    fallback_used,
                };
                self.display = Display::Prompt(if fallback_used {
                    Prompt::DefaultCameraUsed
                } else {
                    Prompt::CameraStarted
                });
                vec![Effect::StartCapture {
                    activation: self.activation,
                }]
            }
            // the user left Webcam mode while the camera was opening
            Ok(CameraAcquired { fallback_used }) => {
                self.camera = CameraStatus::Ready {
                    paused: true,
                    fallback_used,
                };
                vec![Effect::SetCameraPaused(true)]
            }
            Err(e) => {
                let message = e.to_string();
                if self.mode == Mode::Webcam {
                    self.display = Display::Prompt(Prompt::CameraUnavailable(message.clone()));
                }
                self.camera = CameraStatus::Failed { message };
                vec![]
            }
        }
    }

    fn capture_start_failed(&mut self, activation: u64, error: Error) -> Vec<Effect> {
        if self.mode != Mode::Webcam || activation != self.activation {
            return vec![];
        }
        let message = error.to_string();
        self.display = Display::Prompt(Prompt::CameraUnavailable(message.clone()));
        self.camera = CameraStatus::Failed { message };
        vec![]
    }

    fn webcam_prediction(
        &mut self,
        config: &Config,
        activation: u64,
        result: Result<Vec<Prediction>, Error>,
    ) -> Vec<Effect> {
        let live = self.mode == Mode::Webcam
            && activation == self.activation
            && matches!(self.camera, CameraStatus::Ready { paused: false, .. });
        if live {
            self.display = display_for(config, result);
        }
        vec![]
    }

    fn select_file(&mut self, path: Option<PathBuf>) -> Vec<Effect> {
        if self.mode != Mode::Upload {
            return vec![];
        }

        self.upload.pending_image = None;
        // a result for the previous image must not land on the new one
        self.upload.in_flight = None;
        let effects = match path {
            Some(path) => {
                let request = self.upload.take_request_id();
                self.upload.decoding = Some(request);
                self.display = Display::Prompt(Prompt::ReadingImage);
                vec![Effect::DecodeImage { path, request }]
            }
            None => {
                self.upload.decoding = None;
                self.display = Display::Prompt(Prompt::LoadImage);
                vec![]
            }
        };
        self.upload.refresh_classify();
        effects
    }

    fn image_decoded(
        &mut self,
        request: u64,
        result: Result<Arc<DynamicImage>, Error>,
    ) -> Vec<Effect> {
        if self.mode != Mode::Upload || self.upload.decoding != Some(request) {
            return vec![];
        }

        self.upload.decoding = None;
        match result {
            Ok(image) => {
                self.upload.pending_image = Some(image);
                if self.upload.in_flight.is_none() {
                    self.display = Display::Prompt(Prompt::ImageLoaded);
                }
            }
            Err(e) => {
                self.upload.pending_image = None;
                self.display = Display::Prompt(Prompt::ImageUnreadable(e.to_string()));
            }
        }
        self.upload.refresh_classify();
        vec![]
    }

    fn classify_upload(&mut self) -> Vec<Effect> {
        if self.mode != Mode::Upload || !self.upload.classify_enabled {
            return vec![];
        }
        let image = match &self.upload.pending_image {
            Some(image) => image.clone(),
            None => return vec![],
        };

        let request = self.upload.take_request_id();
        self.upload.in_flight = Some(request);
        self.upload.refresh_classify();
        self.display = Display::Prompt(Prompt::Classifying);
        vec![Effect::PredictUpload { image, request }]
    }

    fn upload_prediction(
        &mut self,
        config: &Config,
        request: u64,
        result: Result<Vec<Prediction>, Error>,
    ) -> Vec<Effect> {
        if self.mode != Mode::Upload || self.upload.in_flight != Some(request) {
            return vec![];
        }

        self.upload.in_flight = None;
        self.display = display_for(config, result);
        self.upload.refresh_classify();
        vec![]
    }
}

fn display_for(config: &Config, result: Result<Vec<Prediction>, Error>) -> Display {
    match result.and_then(|predictions| {
        classify(&predictions, &config.catalog, &config.thresholds)
    }) {
        Ok(display_result) => Display::Result(display_result),
        Err(e) => Display::Prompt(Prompt::PredictionFailed(e.to_string())),
    }
}
