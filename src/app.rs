use crate::components::UploadZone;
use crate::message::Message;
use crate::model::upload::PICKER_EXTENSIONS;
use crate::model::{
    ReportState, ScanMachine, ScanStatus, Settlement, UploadCandidate, UploadedFile,
};
use crate::service::{AnalysisService, MockAnalysisService};
use crate::settings::ScanSettings;
use crate::views::{failure, image_viewer, landing, processing, report_panel};
use iced::widget::{column, container, row, text, Space};
use iced::{
    application, event, time, window, Alignment, Element, Event, Length, Subscription, Task,
    Theme,
};
use rfd::AsyncFileDialog;
use std::path::Path;
use std::sync::Arc;

const APP_TITLE: &str = "ClaraScan AI";

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let settings = ScanSettings::from_env();

    application(APP_TITLE, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .run_with(move || (App::new(settings), Task::none()))
}

pub struct App {
    settings: ScanSettings,
    service: Arc<dyn AnalysisService>,
    scan: ScanMachine,
    upload_zone: UploadZone,
    report: ReportState,
}

impl App {
    pub fn new(settings: ScanSettings) -> Self {
        let service = MockAnalysisService::new(settings.analysis_latency, settings.seed);
        Self::with_service(settings, Arc::new(service))
    }

    pub fn with_service(settings: ScanSettings, service: Arc<dyn AnalysisService>) -> Self {
        Self {
            settings,
            service,
            scan: ScanMachine::default(),
            upload_zone: UploadZone::default(),
            report: ReportState::default(),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> ScanStatus {
        self.scan.status()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if self.scan.status() != ScanStatus::Idle {
                    return Task::none();
                }
                Task::perform(
                    async {
                        AsyncFileDialog::new()
                            .set_title("Select a chest X-ray")
                            .add_filter("Images", PICKER_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::FilePicked,
                )
            }
            Message::FilePicked(Some(path)) => {
                if !self.accepts_files(&path) {
                    return Task::none();
                }
                let candidate = self
                    .upload_zone
                    .submit(path, self.settings.max_upload_bytes);
                self.load(candidate)
            }
            Message::FilePicked(None) => Task::none(),
            Message::FileDropped(path) => {
                if !self.accepts_files(&path) {
                    return Task::none();
                }
                let candidate = self
                    .upload_zone
                    .drop_path(path, self.settings.max_upload_bytes);
                self.load(candidate)
            }
            Message::FileLoaded(loaded) => match self.upload_zone.finish_load(loaded) {
                Some(file) => self.start_analysis(file),
                None => Task::none(),
            },
            Message::FileHovered => {
                if self.scan.status() == ScanStatus::Idle {
                    self.upload_zone.hover();
                }
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.upload_zone.leave();
                Task::none()
            }
            Message::StepTick => {
                self.scan.tick();
                Task::none()
            }
            Message::AnalysisSettled { session, outcome } => {
                if let Settlement::Applied(ScanStatus::Complete) = self.scan.settle(session, outcome)
                {
                    self.report = self
                        .scan
                        .result()
                        .map(ReportState::for_result)
                        .unwrap_or_default();
                }
                Task::none()
            }
            Message::SelectFinding(index) => {
                let count = self.scan.result().map_or(0, |result| result.findings.len());
                self.report.select(index, count);
                Task::none()
            }
            Message::ToggleOverlay => {
                self.report.toggle_overlay();
                Task::none()
            }
            Message::SetReportTab(tab) => {
                if self.report.tab != tab {
                    self.report.tab = tab;
                }
                Task::none()
            }
            Message::ExportRequested => {
                log::info!("Export is not available in this build");
                Task::none()
            }
            Message::Reset => {
                self.scan.reset();
                self.report = ReportState::default();
                self.upload_zone.set_disabled(false);
                Task::none()
            }
        }
    }

    fn accepts_files(&self, path: &Path) -> bool {
        if self.scan.status() != ScanStatus::Idle {
            log::warn!(
                "Ignoring {} while a scan is {}",
                path.display(),
                self.scan.status()
            );
            return false;
        }
        true
    }

    /// Reads the validated candidate off the update loop.
    fn load(&self, candidate: Option<UploadCandidate>) -> Task<Message> {
        let Some(candidate) = candidate else {
            return Task::none();
        };
        Task::perform(
            async move { UploadedFile::load(candidate) },
            Message::FileLoaded,
        )
    }

    fn start_analysis(&mut self, file: UploadedFile) -> Task<Message> {
        let session = match self.scan.begin(file) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Analysis not started: {err}");
                return Task::none();
            }
        };
        let Some(file) = self.scan.file() else {
            return Task::none();
        };

        log::info!("Session {session} started for {}", file.file_name());
        let analysis = self.service.analyze(file);
        self.report = ReportState::default();
        self.upload_zone.set_disabled(true);

        Task::perform(analysis, move |outcome| Message::AnalysisSettled {
            session,
            outcome,
        })
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let drops = event::listen_with(file_drop_event);

        if self.scan.status() == ScanStatus::Processing {
            Subscription::batch([
                drops,
                time::every(self.settings.step_interval).map(|_| Message::StepTick),
            ])
        } else {
            drops
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = row![
            column![
                text(APP_TITLE).size(20),
                text("POWERED BY NVIDIA").size(10),
            ]
            .spacing(2),
            Space::with_width(Length::Fill),
            text("System Operational").size(12),
        ]
        .align_y(Alignment::Center);

        let stage = (self.scan.status(), self.scan.file(), self.scan.result());
        let body: Element<'_, Message> = match stage {
            (ScanStatus::Idle, _, _) => landing(&self.upload_zone),
            (ScanStatus::Uploading | ScanStatus::Processing, Some(file), _) => {
                processing(file, self.scan.step_label(), self.scan.step_index())
            }
            (ScanStatus::Complete, Some(file), Some(result)) => row![
                container(image_viewer(file, result, &self.report))
                    .width(Length::FillPortion(8))
                    .height(Length::Fill),
                container(report_panel(result, &self.report))
                    .padding(16)
                    .width(Length::FillPortion(4))
                    .height(Length::Fill)
                    .style(container::rounded_box),
            ]
            .spacing(24)
            .height(Length::Fill)
            .into(),
            _ => failure(),
        };

        let footer = row![
            text("© 2024 ClaraScan AI Demo. For investigational use only.").size(12),
            Space::with_width(Length::Fill),
            text("v2.4.0-beta • NVIDIA T4 GPU").size(12),
        ];

        column![header, container(body).height(Length::Fill), footer]
            .padding(20)
            .spacing(20)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn file_drop_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}
