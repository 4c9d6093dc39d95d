/*
 * Copyright (C) 2024 Aspect
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use log::*;
use windows::Win32::System::Performance;
use windows::Win32::UI::HiDpi;
use windows::Win32::UI::Input::Pointer;
use windows::Win32::UI::WindowsAndMessaging;

use crate::contact::{ContactKind, TouchContact, TouchFeedback};
use crate::error::OsError;
use crate::injector::{FeedbackMode, TouchInjector};

impl From<windows::core::Error> for OsError {
    fn from(err: windows::core::Error) -> Self {
        OsError::from_hresult(err.code().0)
    }
}

impl From<FeedbackMode> for Pointer::TOUCH_FEEDBACK_MODE {
    fn from(mode: FeedbackMode) -> Self {
        match mode {
            FeedbackMode::Default => Pointer::TOUCH_FEEDBACK_DEFAULT,
        }
    }
}

fn to_touch_info(contact: &TouchContact, time: i64) -> Pointer::POINTER_TOUCH_INFO {
    // Pressure and target window stay zeroed.
    let mut touch_info = Pointer::POINTER_TOUCH_INFO::default();
    touch_info.pointerInfo.pointerType = match contact.kind {
        ContactKind::Touch => WindowsAndMessaging::PT_TOUCH,
    };
    touch_info.pointerInfo.pointerId = contact.id;
    touch_info.pointerInfo.PerformanceCount = time as u64;
    touch_info.pointerInfo.ptPixelLocation.x = contact.x;
    touch_info.pointerInfo.ptPixelLocation.y = contact.y;
    touch_info.pointerInfo.pointerFlags = Pointer::POINTER_FLAGS(contact.flags.bits());

    touch_info.touchMask =
        WindowsAndMessaging::TOUCH_MASK_CONTACTAREA | WindowsAndMessaging::TOUCH_MASK_ORIENTATION;
    touch_info.rcContact.top = contact.area.top;
    touch_info.rcContact.bottom = contact.area.bottom;
    touch_info.rcContact.left = contact.area.left;
    touch_info.rcContact.right = contact.area.right;
    touch_info.orientation = contact.orientation;
    touch_info.touchFlags = match contact.feedback {
        TouchFeedback::None => WindowsAndMessaging::TOUCH_FLAG_NONE,
    };

    touch_info
}

/// Injects contacts through `InitializeTouchInjection` / `InjectTouchInput`.
///
/// The injection context is process-wide and has no teardown; it stays
/// valid until the process exits.
pub struct Win32Injector {
    dpi_aware: bool,
}

impl Win32Injector {
    pub fn new(dpi_aware: bool) -> Self {
        Self { dpi_aware }
    }
}

impl TouchInjector for Win32Injector {
    fn initialize(&mut self, max_contacts: u32, feedback: FeedbackMode) -> Result<(), OsError> {
        if self.dpi_aware {
            // Coordinates become physical pixels on every monitor.
            if let Err(e) =
                unsafe { HiDpi::SetProcessDpiAwareness(HiDpi::PROCESS_PER_MONITOR_DPI_AWARE) }
            {
                warn!("Could not enable per-monitor DPI awareness: {e}");
            }
        }

        unsafe { Pointer::InitializeTouchInjection(max_contacts, feedback.into())? };
        debug!("Touch injection initialized for {max_contacts} contacts ({feedback} feedback)");
        Ok(())
    }

    fn inject(&mut self, contacts: &[TouchContact]) -> Result<(), OsError> {
        // One timestamp per frame so every contact in it lines up.
        let mut time: i64 = 0;
        if unsafe { Performance::QueryPerformanceCounter(&mut time) }.is_err() {
            time = 0;
        }

        let frame: Vec<Pointer::POINTER_TOUCH_INFO> = contacts
            .iter()
            .map(|contact| to_touch_info(contact, time))
            .collect();

        unsafe { Pointer::InjectTouchInput(&frame)? };
        Ok(())
    }
}
