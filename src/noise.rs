//! Improved Perlin gradient noise and its fractal sum.

use crate::geometry::{FloatType, WorldPoint, WorldVector};

#[rustfmt::skip]
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252,
    219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168,
    68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211,
    133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80,
    73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100,
    109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82,
    85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248,
    152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108,
    110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210,
    144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181,
    199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Offsets of the second and third channel of `perlin_noise_3d`.
const CHANNEL_OFFSETS: [[FloatType; 3]; 2] = [[131.977, 21.1823, 71.0231], [237.492, 11.1312, 133.129]];

fn perm(i: usize) -> usize {
    PERMUTATION[i & 255] as usize
}

fn fade(t: FloatType) -> FloatType {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: FloatType, a: FloatType, b: FloatType) -> FloatType {
    a + t * (b - a)
}

/// Dot product of the offset with one of 12 gradient directions selected by the hash.
fn grad(hash: usize, x: FloatType, y: FloatType, z: FloatType) -> FloatType {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = match h {
        0..4 => y,
        12 | 14 => x,
        _ => z,
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Single octave of gradient noise, periodic with period 256 on every axis.
///
/// Zero at every integer lattice point, roughly within [-1, 1] elsewhere.
pub fn periodic_noise_3d(x: FloatType, y: FloatType, z: FloatType) -> FloatType {
    let cell = |v: FloatType| (v.floor() as i64 & 255) as usize;
    let (cx, cy, cz) = (cell(x), cell(y), cell(z));

    let (x, y, z) = (x - x.floor(), y - y.floor(), z - z.floor());
    let (u, v, w) = (fade(x), fade(y), fade(z));

    let a = perm(cx) + cy;
    let aa = perm(a) + cz;
    let ab = perm(a + 1) + cz;
    let b = perm(cx + 1) + cy;
    let ba = perm(b) + cz;
    let bb = perm(b + 1) + cz;

    lerp(
        w,
        lerp(
            v,
            lerp(u, grad(perm(aa), x, y, z), grad(perm(ba), x - 1.0, y, z)),
            lerp(u, grad(perm(ab), x, y - 1.0, z), grad(perm(bb), x - 1.0, y - 1.0, z)),
        ),
        lerp(
            v,
            lerp(
                u,
                grad(perm(aa + 1), x, y, z - 1.0),
                grad(perm(ba + 1), x - 1.0, y, z - 1.0),
            ),
            lerp(
                u,
                grad(perm(ab + 1), x, y - 1.0, z - 1.0),
                grad(perm(bb + 1), x - 1.0, y - 1.0, z - 1.0),
            ),
        ),
    )
}

/// Fractal sum of `octaves` noise octaves.
/// Each octave scales the position by `lacunarity` and the weight by `persistence`.
pub fn perlin_noise(
    position: &WorldPoint,
    lacunarity: FloatType,
    persistence: FloatType,
    octaves: u32,
) -> FloatType {
    let mut p = *position;
    let mut amplitude = 1.0;
    let mut sum = 0.0;

    for _ in 0..octaves {
        sum += amplitude * periodic_noise_3d(p.x, p.y, p.z);
        amplitude *= persistence;
        p.coords *= lacunarity;
    }

    sum
}

/// Three decorrelated channels of `perlin_noise`.
pub fn perlin_noise_3d(
    position: &WorldPoint,
    lacunarity: FloatType,
    persistence: FloatType,
    octaves: u32,
) -> WorldVector {
    let channel = |p: &WorldPoint| perlin_noise(p, lacunarity, persistence, octaves);
    WorldVector::new(
        channel(position),
        channel(&(position + WorldVector::from(CHANNEL_OFFSETS[0]))),
        channel(&(position + WorldVector::from(CHANNEL_OFFSETS[1]))),
    )
}
