// SPDX-License-Identifier: LGPL-3.0-or-later

//! Floating-point sanitization and denormal control.
//!
//! Decaying gate state spends most of its life near zero, where denormal
//! arithmetic can be orders of magnitude slower than normal arithmetic.
//! [`DenormalGuard`] switches the FPU to flush-to-zero for the duration of
//! a processing block; [`sanitize`] flushes individual values in code that
//! runs outside a guarded block.

/// Sanitize a single float value: flush denormals, NaN, and infinity to zero.
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if x.is_finite() && x.abs() >= f32::MIN_POSITIVE {
        x
    } else {
        0.0
    }
}

/// Sanitize a buffer of floats in place.
pub fn sanitize_buf(buf: &mut [f32]) {
    for sample in buf.iter_mut() {
        *sample = sanitize(*sample);
    }
}

/// RAII guard that enables flush-to-zero / denormals-are-zero handling.
///
/// On x86-64 this sets the FTZ and DAZ bits in MXCSR and restores the
/// previous control word on drop. On other targets it is a no-op; the
/// explicit floors in the gate math keep state out of the denormal range
/// often enough for correctness either way.
#[derive(Debug)]
pub struct DenormalGuard {
    #[cfg(target_arch = "x86_64")]
    saved_mxcsr: u32,
}

/// FTZ (bit 15) and DAZ (bit 6) of the MXCSR control register.
#[cfg(target_arch = "x86_64")]
const MXCSR_FTZ_DAZ: u32 = (1 << 15) | (1 << 6);

impl DenormalGuard {
    /// Enable flush-to-zero handling until the guard is dropped.
    pub fn new() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            // Safety: reading and writing MXCSR has no memory effects.
            let saved_mxcsr = unsafe { std::arch::x86_64::_mm_getcsr() };
            unsafe { std::arch::x86_64::_mm_setcsr(saved_mxcsr | MXCSR_FTZ_DAZ) };
            Self { saved_mxcsr }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            Self {}
        }
    }
}

impl Default for DenormalGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "x86_64")]
impl Drop for DenormalGuard {
    fn drop(&mut self) {
        // Safety: restores the control word captured in new().
        unsafe { std::arch::x86_64::_mm_setcsr(self.saved_mxcsr) };
    }
}
