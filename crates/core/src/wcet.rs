//! Worst-case-execution-time capture kernels.
//!
//! Small deterministic workloads with data-independent control flow, meant
//! to be invoked repeatedly under an external measurement harness. Each
//! kernel is a plain `fn() -> u64` returning a checksum of its result; the
//! driver consumes the checksum so no run can be optimized away. Inputs are
//! pinned with [`black_box`] so a kernel's work is redone every invocation
//! instead of being folded at compile time.

use std::hint::black_box;

use stresskit_domain::WcetKernel;

/// A kernel entry point: one full run, returning a result checksum.
pub type Entry = fn() -> u64;

/// Resolve the entry point for `kernel`.
pub fn entry(kernel: WcetKernel) -> Entry {
    match kernel {
        WcetKernel::Fibcall => fibcall,
        WcetKernel::Bsort => bsort,
        WcetKernel::Insertsort => insertsort,
        WcetKernel::Matmult => matmult,
        WcetKernel::Crc => crc,
        WcetKernel::Prime => prime,
        WcetKernel::VectorAdd => vector_add,
    }
}

/// Iterative Fibonacci; fib(30) = 832040.
pub fn fibcall() -> u64 {
    let n = black_box(30u32);
    let mut a = 0u64;
    let mut b = 1u64;
    for _ in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}

/// Bubble sort over 100 elements seeded in descending order. The checksum
/// weights each slot by its index, so any mis-sort changes it.
pub fn bsort() -> u64 {
    const N: usize = 100;
    let mut a = [0u64; N];
    for (i, slot) in a.iter_mut().enumerate() {
        *slot = black_box((N - i) as u64);
    }

    for pass in 0..N - 1 {
        for i in 0..N - 1 - pass {
            if a[i] > a[i + 1] {
                a.swap(i, i + 1);
            }
        }
    }

    a.iter().enumerate().map(|(i, &v)| i as u64 * v).sum()
}

/// Insertion sort over 50 elements seeded in descending order, checksummed
/// like [`bsort`].
pub fn insertsort() -> u64 {
    const N: usize = 50;
    let mut a = [0u64; N];
    for (i, slot) in a.iter_mut().enumerate() {
        *slot = black_box((N - i) as u64);
    }

    for i in 1..N {
        let key = a[i];
        let mut j = i;
        while j > 0 && a[j - 1] > key {
            a[j] = a[j - 1];
            j -= 1;
        }
        a[j] = key;
    }

    a.iter().enumerate().map(|(i, &v)| i as u64 * v).sum()
}

/// 20x20 integer matrix product with wrapping arithmetic; the checksum is
/// the wrapping sum of the result matrix.
pub fn matmult() -> u64 {
    const N: usize = 20;
    let mut a = [[0u64; N]; N];
    let mut b = [[0u64; N]; N];
    for i in 0..N {
        for j in 0..N {
            a[i][j] = black_box((i * N + j) as u64);
            b[i][j] = black_box((i * N + j + 1) as u64);
        }
    }

    let mut sum = 0u64;
    for i in 0..N {
        for j in 0..N {
            let mut cell = 0u64;
            for (k, row) in b.iter().enumerate() {
                cell = cell.wrapping_add(a[i][k].wrapping_mul(row[j]));
            }
            sum = sum.wrapping_add(cell);
        }
    }
    sum
}

/// Bitwise CRC-16/CCITT over a fixed message.
pub fn crc() -> u64 {
    const MESSAGE: &[u8] = b"asdffeagewaHAFEFaeDsFEawFdsFaefaeerdjgp";
    const POLY: u16 = 0x1021;

    let mut crc = 0xFFFFu16;
    for &byte in black_box(MESSAGE) {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
        }
    }
    u64::from(crc)
}

/// Trial-division prime count below 10000; exactly 1229 primes.
pub fn prime() -> u64 {
    let bound = black_box(10_000u64);
    let mut count = 0u64;
    let mut n = 2u64;
    while n < bound {
        let mut is_prime = true;
        let mut d = 2u64;
        while d * d <= n {
            if n.is_multiple_of(d) {
                is_prime = false;
                break;
            }
            d += 1;
        }
        if is_prime {
            count += 1;
        }
        n += 1;
    }
    count
}

/// Element-wise sum of two harmonic-series vectors; the checksum is the bit
/// pattern of the accumulated single-precision total.
pub fn vector_add() -> u64 {
    const N: usize = 1_024;
    let mut a = [0f32; N];
    let mut b = [0f32; N];
    for i in 0..N {
        a[i] = black_box(1.0 / (i as f32 + 1.0));
        b[i] = black_box(1.0 / (i as f32 + 1.0));
    }

    let mut total = 0f32;
    for (&x, &y) in a.iter().zip(&b) {
        total += x + y;
    }
    u64::from(total.to_bits())
}
