//! Elementwise kernels behind the in-place methods of [`TensorDataMut`].

use crate::error::{Result, TensorError};
use crate::tensor::{TensorData, TensorDataMut};

pub(crate) fn add<A, B>(a: &mut A, b: &B) -> Result<()>
where
    A: TensorDataMut + ?Sized,
    B: TensorData + ?Sized,
{
    require_len("add", a, b, a.size() == b.size())?;
    for (x, y) in a.get_mut().iter_mut().zip(b.get()) {
        *x += y;
    }
    Ok(())
}

pub(crate) fn add_scalar(a: &mut [f64], delta: f64) {
    for x in a.iter_mut() {
        *x += delta;
    }
}

/// Driven by the length of `b`: a shorter `b` only touches that prefix of `a`.
pub(crate) fn subtract<A, B>(a: &mut A, b: &B) -> Result<()>
where
    A: TensorDataMut + ?Sized,
    B: TensorData + ?Sized,
{
    require_len("subtract", a, b, b.size() <= a.size())?;
    let a = a.get_mut();
    for (k, y) in b.get().iter().enumerate() {
        a[k] -= y;
    }
    Ok(())
}

pub(crate) fn schur<A, B>(a: &mut A, b: &B) -> Result<()>
where
    A: TensorDataMut + ?Sized,
    B: TensorData + ?Sized,
{
    require_len("schur", a, b, a.size() == b.size())?;
    for (x, y) in a.get_mut().iter_mut().zip(b.get()) {
        *x *= y;
    }
    Ok(())
}

pub(crate) fn square(a: &mut [f64]) {
    for x in a.iter_mut() {
        *x *= *x;
    }
}

fn require_len<A, B>(op: &'static str, a: &A, b: &B, ok: bool) -> Result<()>
where
    A: TensorData + ?Sized,
    B: TensorData + ?Sized,
{
    if ok {
        return Ok(());
    }
    log::debug!(
        "{} rejected: {} elements against {}",
        op,
        a.size(),
        b.size()
    );
    Err(TensorError::ShapeMismatch {
        op,
        left: a.shape().clone(),
        right: b.shape().clone(),
    })
}
