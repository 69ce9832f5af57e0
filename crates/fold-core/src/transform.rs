#![forbid(unsafe_code)]

//! 3D layer transforms and 2D content translations.
//!
//! [`Transform3D`] is a 4×4 homogeneous matrix using the row-vector
//! convention: a point `p` maps to `p · M`. [`Transform3D::concat`]
//! therefore reads left to right: `a.concat(&b)` applies `a` first, then `b`.
//!
//! # Invariants
//!
//! 1. `identity().concat(&t) == t` and `t.concat(&identity()) == t`.
//! 2. Rotations are normalised by their axis length; a zero axis yields identity.
//! 3. [`Transform3D::apply`] divides by the homogeneous `w` only when it is non-zero.

/// Default perspective eye distance used by hinge panels (`m34 = -1/500`).
pub const DEFAULT_EYE_DISTANCE: f64 = 500.0;

/// A 4×4 homogeneous transform (row-vector convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    /// Row-major matrix entries, `m[row][col]`.
    pub m: [[f64; 4]; 4],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// The identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// A pure translation.
    #[must_use]
    pub const fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        let mut t = Self::identity();
        t.m[3][0] = tx;
        t.m[3][1] = ty;
        t.m[3][2] = tz;
        t
    }

    /// A rotation of `angle` radians about the axis `(x, y, z)`.
    #[must_use]
    pub fn rotation(angle: f64, x: f64, y: f64, z: f64) -> Self {
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return Self::identity();
        }
        let (x, y, z) = (x / len, y / len, z / len);
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        // Column-vector Rodrigues matrix, stored transposed for row vectors.
        let r = [
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
        ];
        let mut out = Self::identity();
        for (row, out_row) in out.m.iter_mut().take(3).enumerate() {
            for (col, cell) in out_row.iter_mut().take(3).enumerate() {
                *cell = r[col][row];
            }
        }
        out
    }

    /// A perspective projection with the eye at `distance` along +z.
    #[must_use]
    pub fn perspective(distance: f64) -> Self {
        let mut t = Self::identity();
        if distance != 0.0 {
            t.m[2][3] = -1.0 / distance;
        }
        t
    }

    /// Compose: apply `self`, then `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Self { m: out }
    }

    /// Map a 3D point through the transform.
    #[must_use]
    pub fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let v = [x, y, z, 1.0];
        let mut r = [0.0; 4];
        for (j, out) in r.iter_mut().enumerate() {
            *out = (0..4).map(|k| v[k] * self.m[k][j]).sum();
        }
        if r[3] != 0.0 && r[3] != 1.0 {
            (r[0] / r[3], r[1] / r[3], r[2] / r[3])
        } else {
            (r[0], r[1], r[2])
        }
    }

    /// Whether every entry is within `eps` of `other`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

/// A 2D translation applied to the centre content surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffineTranslation {
    pub tx: f64,
    pub ty: f64,
}

impl AffineTranslation {
    /// No movement.
    pub const IDENTITY: Self = Self { tx: 0.0, ty: 0.0 };

    #[must_use]
    pub const fn new(tx: f64, ty: f64) -> Self {
        Self { tx, ty }
    }

    /// The translation as a point offset.
    #[must_use]
    pub const fn offset(&self) -> crate::geometry::Point {
        crate::geometry::Point::new(self.tx, self.ty)
    }
}
