//! Альтернативный ввод: акселерометр по serial
//!
//! Устройство непрерывно печатает текущий жест строками `\r\n`.
//! Внешний reader thread читает порт и шлёт сырые чанки в канал;
//! симуляция раз в кадр неблокирующе забирает всё накопленное и берёт
//! только самую свежую полную строку.
//!
//! ```text
//! serial port → reader thread → mpsc::Sender<Vec<u8>>
//!     ↓
//! ChannelGestureSource::poll (NonSend, main thread)
//!     ↓
//! InputState::apply_gesture → Control::Attack (level)
//! ```

use std::str::FromStr;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::error::GestureParseError;

/// Двухзначный жест
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Экраном вверх: топор в покое
    Rest,
    /// Экраном вниз: замах
    Swing,
}

impl Gesture {
    pub fn attack_pressed(self) -> bool {
        matches!(self, Gesture::Swing)
    }
}

impl FromStr for Gesture {
    type Err = GestureParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim() {
            "face up" => Ok(Gesture::Rest),
            "face down" => Ok(Gesture::Swing),
            other => Err(GestureParseError(other.to_string())),
        }
    }
}

/// Буфер для потока строк с частичными чанками.
#[derive(Debug, Default, Clone)]
pub struct SerialLineBuffer {
    cache: String,
}

impl SerialLineBuffer {
    const TERMINATOR: &'static str = "\r\n";

    /// Добавить чанк; вернуть самую свежую полную строку, если она появилась.
    ///
    /// Незавершённый хвост остаётся в буфере до следующего чанка.
    /// Более старые полные строки отбрасываются.
    pub fn push(&mut self, chunk: &[u8]) -> Option<String> {
        self.cache.push_str(&String::from_utf8_lossy(chunk));

        let last_end = self.cache.rfind(Self::TERMINATOR)?;
        let tail = self.cache.split_off(last_end + Self::TERMINATOR.len());
        let complete = std::mem::replace(&mut self.cache, tail);

        complete[..last_end]
            .rsplit(Self::TERMINATOR)
            .next()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
    }
}

/// Источник жестов, опрашивается раз в кадр. Никогда не блокирует.
pub trait GestureSource {
    /// Свежий жест с прошлого опроса (None = ничего нового/нераспознанное).
    fn poll(&mut self) -> Option<Gesture>;
}

/// Источник поверх канала байтовых чанков от reader thread.
pub struct ChannelGestureSource {
    receiver: Receiver<Vec<u8>>,
    buffer: SerialLineBuffer,
    disconnected: bool,
}

impl ChannelGestureSource {
    pub fn new(receiver: Receiver<Vec<u8>>) -> Self {
        Self {
            receiver,
            buffer: SerialLineBuffer::default(),
            disconnected: false,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl GestureSource for ChannelGestureSource {
    fn poll(&mut self) -> Option<Gesture> {
        let mut newest = None;

        loop {
            match self.receiver.try_recv() {
                Ok(chunk) => {
                    if let Some(line) = self.buffer.push(&chunk) {
                        newest = Some(line);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        crate::logger::log_warning("Gesture device disconnected, attack input frozen");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }

        match newest?.parse::<Gesture>() {
            Ok(gesture) => Some(gesture),
            Err(err) => {
                // Остальные жесты устройства (shake, tilt...) нам не нужны
                crate::logger::log(&format!("Gesture ignored: {}", err));
                None
            }
        }
    }
}

/// NonSend resource: подключённый источник жестов.
pub struct GestureFeed {
    source: Box<dyn GestureSource>,
}

impl GestureFeed {
    pub fn new(source: Box<dyn GestureSource>) -> Self {
        Self { source }
    }

    pub fn poll(&mut self) -> Option<Gesture> {
        self.source.poll()
    }
}
