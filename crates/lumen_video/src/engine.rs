//! 视频图层引擎

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use lumen_dispatch::{ChannelDispatcher, Envelope, LayerMessage};
use lumen_store::VIDEO_LAYER;

use crate::{EngineCommand, MediaClock, VideoError, VideoEvent};

/// 引擎配置
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 时钟节拍，播放时每个节拍回报一次进度
    pub tick: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
        }
    }
}

/// 引擎句柄
pub struct VideoEngineHandle {
    pub cmd_tx: Sender<EngineCommand>,
    pub evt_rx: Receiver<VideoEvent>,
}

impl VideoEngineHandle {
    /// 向本引擎投递请求的派发器
    pub fn dispatcher(&self) -> ChannelDispatcher<EngineCommand> {
        ChannelDispatcher::new(self.cmd_tx.clone())
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

/// 启动视频引擎
pub fn spawn_video_engine(config: EngineConfig) -> VideoEngineHandle {
    let (cmd_tx, cmd_rx) = bounded(32);
    let (evt_tx, evt_rx) = bounded(256);

    thread::spawn(move || {
        run_engine(cmd_rx, evt_tx, config);
    });

    VideoEngineHandle { cmd_tx, evt_rx }
}

fn run_engine(cmd_rx: Receiver<EngineCommand>, evt_tx: Sender<VideoEvent>, config: EngineConfig) {
    log::info!("video engine started, tick={:?}", config.tick);
    let mut state = EngineState::new(evt_tx);

    loop {
        match cmd_rx.recv_timeout(config.tick) {
            Ok(cmd) => {
                if !state.handle_command(cmd) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        state.tick(Instant::now());
    }

    log::info!("video engine stopped");
}

struct EngineState {
    evt_tx: Sender<VideoEvent>,
    clock: Option<MediaClock>,
}

impl EngineState {
    fn new(evt_tx: Sender<VideoEvent>) -> Self {
        Self {
            evt_tx,
            clock: None,
        }
    }

    fn handle_command(&mut self, cmd: EngineCommand) -> bool {
        match cmd {
            EngineCommand::Request(envelope) => {
                self.handle_request(envelope);
                true
            }
            EngineCommand::Shutdown => false,
        }
    }

    fn handle_request(&mut self, envelope: Envelope) {
        if envelope.target != VIDEO_LAYER {
            log::debug!("ignoring request for target {}", envelope.target);
            return;
        }

        let now = Instant::now();
        if let Err(e) = self.handle_message(envelope.message, now) {
            log::warn!("{} failed: {}", envelope.message.kind(), e);
            self.emit(VideoEvent::Error(e.to_string()));
        }
    }

    fn handle_message(&mut self, message: LayerMessage, now: Instant) -> Result<(), VideoError> {
        match message {
            LayerMessage::Load(duration) => {
                let clock = MediaClock::new(duration)?;
                self.emit(VideoEvent::Loaded(clock.snapshot(now)));
                self.clock = Some(clock);
            }
            LayerMessage::Unload => {
                if self.clock.take().is_some() {
                    self.emit(VideoEvent::Unloaded);
                }
            }
            LayerMessage::Play => {
                let clock = self.clock.as_mut().ok_or(VideoError::NotLoaded)?;
                if clock.at_end(now) {
                    clock.seek(0.0, now)?;
                }
                clock.play(now);
            }
            LayerMessage::Pause => {
                let clock = self.clock.as_mut().ok_or(VideoError::NotLoaded)?;
                clock.pause(now);
                let snapshot = clock.snapshot(now);
                self.emit(VideoEvent::Progress(snapshot));
            }
            LayerMessage::Seek(position) => {
                let clock = self.clock.as_mut().ok_or(VideoError::NotLoaded)?;
                clock.seek(position, now)?;
                let snapshot = clock.snapshot(now);
                self.emit(VideoEvent::Progress(snapshot));
            }
        }
        Ok(())
    }

    fn tick(&mut self, now: Instant) {
        let Some(clock) = self.clock.as_mut() else {
            return;
        };
        if !clock.is_playing() {
            return;
        }

        let ended = clock.at_end(now);
        if ended {
            clock.pause(now);
        }
        let snapshot = clock.snapshot(now);
        self.emit(VideoEvent::Progress(snapshot));
        if ended {
            self.emit(VideoEvent::Ended);
        }
    }

    fn emit(&self, event: VideoEvent) {
        if self.evt_tx.try_send(event).is_err() {
            log::debug!("video event dropped, host not keeping up");
        }
    }
}
