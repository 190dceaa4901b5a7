//! Непрерывные функции принадлежности входных термов

use heapless::Vec;

use crate::control::error::FuzzyError;
use crate::control::MAX_TERMS;
use crate::utils::math::constrain;

/// Форма кусочно-линейной функции принадлежности
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MembershipShape {
    /// Треугольник: 0 вне [lower, upper], 1 в вершине
    Triangle { lower: f32, peak: f32, upper: f32 },
    /// Левое плечо: 1 при x <= peak, спадает к 0 в upper
    LeftShoulder { peak: f32, upper: f32 },
    /// Правое плечо: 1 при x >= peak, растет от 0 в lower
    RightShoulder { lower: f32, peak: f32 },
}

/// Функция принадлежности над непрерывным доменом
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContinuousMembershipFunction {
    shape: MembershipShape,
}

impl ContinuousMembershipFunction {
    /// Треугольная функция, требуется lower < peak < upper
    pub fn triangle(lower: f32, peak: f32, upper: f32) -> Result<Self, FuzzyError> {
        check_finite(&[lower, peak, upper])?;
        if !(lower < peak && peak < upper) {
            return Err(FuzzyError::InvalidParameter {
                reason: "triangle requires lower < peak < upper",
            });
        }
        Ok(Self {
            shape: MembershipShape::Triangle { lower, peak, upper },
        })
    }

    /// Левое плечо (нет нижней границы)
    pub fn left_shoulder(peak: f32, upper: f32) -> Result<Self, FuzzyError> {
        check_finite(&[peak, upper])?;
        if !(peak < upper) {
            return Err(FuzzyError::InvalidParameter {
                reason: "left shoulder requires peak < upper",
            });
        }
        Ok(Self {
            shape: MembershipShape::LeftShoulder { peak, upper },
        })
    }

    /// Правое плечо (нет верхней границы)
    pub fn right_shoulder(lower: f32, peak: f32) -> Result<Self, FuzzyError> {
        check_finite(&[lower, peak])?;
        if !(lower < peak) {
            return Err(FuzzyError::InvalidParameter {
                reason: "right shoulder requires lower < peak",
            });
        }
        Ok(Self {
            shape: MembershipShape::RightShoulder { lower, peak },
        })
    }

    /// Плечо по двум точкам: сторона определяется положением `bound`
    /// относительно `peak`
    pub fn shoulder(bound: f32, peak: f32) -> Result<Self, FuzzyError> {
        if bound > peak {
            Self::left_shoulder(peak, bound)
        } else {
            Self::right_shoulder(bound, peak)
        }
    }

    pub fn from_shape(shape: MembershipShape) -> Result<Self, FuzzyError> {
        match shape {
            MembershipShape::Triangle { lower, peak, upper } => Self::triangle(lower, peak, upper),
            MembershipShape::LeftShoulder { peak, upper } => Self::left_shoulder(peak, upper),
            MembershipShape::RightShoulder { lower, peak } => Self::right_shoulder(lower, peak),
        }
    }

    pub fn shape(&self) -> MembershipShape {
        self.shape
    }

    /// Вершина функции (точка, где принадлежность достигает 1)
    pub fn peak(&self) -> f32 {
        match self.shape {
            MembershipShape::Triangle { peak, .. }
            | MembershipShape::LeftShoulder { peak, .. }
            | MembershipShape::RightShoulder { peak, .. } => peak,
        }
    }

    /// Степень принадлежности x, всегда в [0, 1]
    ///
    /// Конструкторы гарантируют ненулевую ширину склонов, поэтому делим
    /// без проверки: даже очень узкий терм дает 1 в вершине.
    pub fn evaluate(&self, x: f32) -> f32 {
        match self.shape {
            MembershipShape::Triangle { lower, peak, upper } => {
                if x < lower || x > upper {
                    0.0
                } else if x <= peak {
                    rising(lower, peak, x)
                } else {
                    falling(peak, upper, x)
                }
            }
            MembershipShape::LeftShoulder { peak, upper } => {
                if x <= peak {
                    1.0
                } else {
                    falling(peak, upper, x)
                }
            }
            MembershipShape::RightShoulder { lower, peak } => {
                if x >= peak {
                    1.0
                } else {
                    rising(lower, peak, x)
                }
            }
        }
    }
}

/// Склон от 0 в `lower` до 1 в `peak`
#[inline]
fn rising(lower: f32, peak: f32, x: f32) -> f32 {
    constrain((x - lower) / (peak - lower), 0.0, 1.0)
}

/// Склон от 1 в `peak` до 0 в `upper`
#[inline]
fn falling(peak: f32, upper: f32, x: f32) -> f32 {
    constrain((upper - x) / (upper - peak), 0.0, 1.0)
}

fn check_finite(values: &[f32]) -> Result<(), FuzzyError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(FuzzyError::InvalidParameter {
            reason: "membership parameters must be finite",
        })
    }
}

/// Равномерное разбиение домена на `2 * slices - 1` термов
///
/// Вершины соседних термов отстоят на `half_width / slices`, крайние
/// термы - плечи, остальные - треугольники, пересекающиеся с соседями
/// на половине высоты. Центральный терм имеет вершину в `center`.
pub fn uniform_partition(
    center: f32,
    half_width: f32,
    slices: usize,
) -> Result<Vec<ContinuousMembershipFunction, MAX_TERMS>, FuzzyError> {
    if slices < 2 {
        return Err(FuzzyError::InvalidParameter {
            reason: "partition needs at least two slices",
        });
    }
    if !(half_width > 0.0) {
        return Err(FuzzyError::InvalidParameter {
            reason: "partition half width must be positive",
        });
    }
    let count = 2 * slices - 1;
    if count > MAX_TERMS {
        return Err(FuzzyError::CapacityExceeded { capacity: MAX_TERMS });
    }

    let step = half_width / slices as f32;
    let peak_at = |k: usize| center + (k as f32 - (slices - 1) as f32) * step;

    let mut terms = Vec::new();
    for k in 0..count {
        let peak = peak_at(k);
        let term = if k == 0 {
            ContinuousMembershipFunction::left_shoulder(peak, peak + step)?
        } else if k == count - 1 {
            ContinuousMembershipFunction::right_shoulder(peak - step, peak)?
        } else {
            ContinuousMembershipFunction::triangle(peak - step, peak, peak + step)?
        };
        terms
            .push(term)
            .map_err(|_| FuzzyError::CapacityExceeded { capacity: MAX_TERMS })?;
    }

    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_triangle_peak_and_support() {
        let f = ContinuousMembershipFunction::triangle(-4.0, 0.0, 4.0).unwrap();
        assert_eq!(f.evaluate(0.0), 1.0);
        assert_eq!(f.evaluate(-4.0), 0.0);
        assert_eq!(f.evaluate(4.0), 0.0);
        assert_eq!(f.evaluate(-4.5), 0.0);
        assert_eq!(f.evaluate(100.0), 0.0);
        assert!((f.evaluate(-2.0) - 0.5).abs() < EPS);
        assert!((f.evaluate(3.0) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_asymmetric_triangle() {
        let f = ContinuousMembershipFunction::triangle(0.0, 1.0, 5.0).unwrap();
        assert!((f.evaluate(0.5) - 0.5).abs() < EPS);
        assert!((f.evaluate(3.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        assert!(matches!(
            ContinuousMembershipFunction::triangle(1.0, 1.0, 2.0),
            Err(FuzzyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ContinuousMembershipFunction::triangle(0.0, 2.0, 2.0),
            Err(FuzzyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ContinuousMembershipFunction::triangle(3.0, 2.0, 1.0),
            Err(FuzzyError::InvalidParameter { .. })
        ));
        assert!(ContinuousMembershipFunction::triangle(f32::NAN, 0.0, 1.0).is_err());
        assert!(ContinuousMembershipFunction::left_shoulder(1.0, 1.0).is_err());
        assert!(ContinuousMembershipFunction::right_shoulder(0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_left_shoulder_saturates() {
        // Отрицательные значения домена - обычные числа, а не признак плеча
        let f = ContinuousMembershipFunction::left_shoulder(-12.0, -8.0).unwrap();
        for x in [-1000.0, -50.0, -12.5, -12.0] {
            assert_eq!(f.evaluate(x), 1.0);
        }
        assert!((f.evaluate(-10.0) - 0.5).abs() < EPS);
        assert_eq!(f.evaluate(-8.0), 0.0);
        assert_eq!(f.evaluate(0.0), 0.0);
    }

    #[test]
    fn test_right_shoulder_saturates() {
        let f = ContinuousMembershipFunction::right_shoulder(1.5, 1.75).unwrap();
        for x in [1.75, 2.0, 10.0, 1.0e6] {
            assert_eq!(f.evaluate(x), 1.0);
        }
        assert!((f.evaluate(1.625) - 0.5).abs() < EPS);
        assert_eq!(f.evaluate(1.5), 0.0);
        assert_eq!(f.evaluate(-3.0), 0.0);
    }

    #[test]
    fn test_shoulder_from_two_points() {
        let left = ContinuousMembershipFunction::shoulder(0.5, 0.25).unwrap();
        assert_eq!(
            left.shape(),
            MembershipShape::LeftShoulder { peak: 0.25, upper: 0.5 }
        );
        let right = ContinuousMembershipFunction::shoulder(-8.0, -4.0).unwrap();
        assert_eq!(
            right.shape(),
            MembershipShape::RightShoulder { lower: -8.0, peak: -4.0 }
        );
        assert!(ContinuousMembershipFunction::shoulder(1.0, 1.0).is_err());
    }

    /// Проход по x с малым шагом: без скачков, растет до вершины,
    /// дальше не растет
    fn assert_continuous_and_unimodal(f: &ContinuousMembershipFunction, from: f32, to: f32) {
        let step = 0.01;
        let peak = f.peak();
        let mut x = from;
        let mut prev = f.evaluate(x);
        while x < to {
            let next_x = x + step;
            let next = f.evaluate(next_x);
            assert!((next - prev).abs() <= step / 2.0 + EPS, "jump at {}", next_x);
            if next_x <= peak {
                assert!(next >= prev - EPS, "falls before peak at {}", next_x);
            } else if x >= peak {
                assert!(next <= prev + EPS, "rises after peak at {}", next_x);
            }
            prev = next;
            x = next_x;
        }
    }

    #[test]
    fn test_continuous_and_piecewise_monotonic() {
        let triangle = ContinuousMembershipFunction::triangle(-2.0, 1.0, 3.0).unwrap();
        assert_continuous_and_unimodal(&triangle, -3.0, 4.0);

        // Склоны шириной 2: наклон 0.5, как у треугольника
        let left = ContinuousMembershipFunction::left_shoulder(-1.0, 1.0).unwrap();
        assert_continuous_and_unimodal(&left, -4.0, 4.0);
        let right = ContinuousMembershipFunction::right_shoulder(-1.0, 1.0).unwrap();
        assert_continuous_and_unimodal(&right, -4.0, 4.0);
    }

    #[test]
    fn test_narrow_terms() {
        // Склоны уже f32::EPSILON
        let t = ContinuousMembershipFunction::triangle(0.0, 1e-8, 1.0).unwrap();
        assert_eq!(t.evaluate(1e-8), 1.0);
        assert!((t.evaluate(0.5) - 0.5).abs() < EPS);
        assert_eq!(t.evaluate(0.0), 0.0);

        let t = ContinuousMembershipFunction::triangle(-1.0, 0.0, 1e-8).unwrap();
        assert_eq!(t.evaluate(0.0), 1.0);
        assert!((t.evaluate(5e-9) - 0.5).abs() < 1e-3);
        assert_eq!(t.evaluate(1e-8), 0.0);

        let left = ContinuousMembershipFunction::left_shoulder(0.0, 5e-8).unwrap();
        assert!((left.evaluate(2.5e-8) - 0.5).abs() < 1e-3);
        assert_eq!(left.evaluate(0.0), 1.0);
        assert_eq!(left.evaluate(5e-8), 0.0);

        let right = ContinuousMembershipFunction::right_shoulder(0.0, 5e-8).unwrap();
        assert!((right.evaluate(2.5e-8) - 0.5).abs() < 1e-3);
        assert_eq!(right.evaluate(5e-8), 1.0);
        assert_eq!(right.evaluate(0.0), 0.0);
    }

    #[test]
    fn test_from_shape_validates() {
        let shape = MembershipShape::Triangle { lower: 0.0, peak: 0.0, upper: 1.0 };
        assert!(ContinuousMembershipFunction::from_shape(shape).is_err());
        let shape = MembershipShape::RightShoulder { lower: 0.0, peak: 1.0 };
        assert_eq!(
            ContinuousMembershipFunction::from_shape(shape).unwrap().peak(),
            1.0
        );
    }

    #[test]
    fn test_uniform_partition() {
        let terms = uniform_partition(0.0, 16.0, 4).unwrap();
        assert_eq!(terms.len(), 7);
        assert_eq!(
            terms[0].shape(),
            MembershipShape::LeftShoulder { peak: -12.0, upper: -8.0 }
        );
        assert_eq!(
            terms[3].shape(),
            MembershipShape::Triangle { lower: -4.0, peak: 0.0, upper: 4.0 }
        );
        assert_eq!(
            terms[6].shape(),
            MembershipShape::RightShoulder { lower: 8.0, peak: 12.0 }
        );

        // Любая точка покрыта хотя бы одним термом
        let mut x = -40.0;
        while x <= 40.0 {
            let total: f32 = terms.iter().map(|t| t.evaluate(x)).sum();
            assert!(total > 0.0);
            x += 0.37;
        }
    }

    #[test]
    fn test_uniform_partition_limits() {
        assert!(uniform_partition(0.0, 1.0, 1).is_err());
        assert!(uniform_partition(0.0, 0.0, 4).is_err());
        assert_eq!(
            uniform_partition(0.0, 1.0, 9),
            Err(FuzzyError::CapacityExceeded { capacity: MAX_TERMS })
        );
    }
}
