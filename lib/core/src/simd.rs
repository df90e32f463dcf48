// Unrolled scalar kernels for the dot product and L2 norm.
// Term-frequency vectors are short (100 slots by default), so four independent
// accumulators give the compiler enough room to auto-vectorize without
// reaching for platform intrinsics.

const LANES: usize = 4;

/// Dot product of two equal-length slices; mismatched lengths yield 0.0
#[inline]
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut acc = [0.0f32; LANES];
    let chunks_a = a.chunks_exact(LANES);
    let chunks_b = b.chunks_exact(LANES);
    let tail_a = chunks_a.remainder();
    let tail_b = chunks_b.remainder();

    for (ca, cb) in chunks_a.zip(chunks_b) {
        for lane in 0..LANES {
            acc[lane] += ca[lane] * cb[lane];
        }
    }

    let mut sum = (acc[0] + acc[1]) + (acc[2] + acc[3]);
    for (x, y) in tail_a.iter().zip(tail_b.iter()) {
        sum += x * y;
    }
    sum
}

/// Euclidean norm
#[inline]
pub fn norm_simd(a: &[f32]) -> f32 {
    dot_product_simd(a, a).sqrt()
}

/// Sum of all components
#[inline]
pub fn sum_simd(a: &[f32]) -> f32 {
    let mut acc = [0.0f32; LANES];
    let chunks = a.chunks_exact(LANES);
    let tail = chunks.remainder();
    for c in chunks {
        for lane in 0..LANES {
            acc[lane] += c[lane];
        }
    }
    (acc[0] + acc[1]) + (acc[2] + acc[3]) + tail.iter().sum::<f32>()
}
