//! Application services - Use case implementations

mod controller;
mod map_picker;
mod presenter;

pub use controller::{
    ControllerSettings, ControllerState, InteractionController, PICK_DESTINATION_MESSAGE,
    SEARCHING_MESSAGE, SubmitOutcome, UiState,
};
pub use map_picker::{MapPicker, PickerStep};
pub use presenter::{
    LOAD_FAILED_MESSAGE, MarkerSpec, NO_RESULTS_MESSAGE, PLACEHOLDER, RenderedView,
    ResultPresenter, UNKNOWN_STOP, format_time, format_time_in, raw_output,
};
