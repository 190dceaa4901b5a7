//! Математические функции и утилиты

/// Ограничение значения в заданных пределах
#[inline(always)]
pub fn constrain(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Сравнение с абсолютным допуском
#[inline]
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    libm::fabsf(a - b) <= tolerance
}

/// Координата `index`-й точки равномерной сетки на [-bound, bound]
///
/// Сетка из `resolution + 1` точек. Считается как `bound * (2i - n) / n`,
/// поэтому точки `i` и `n - i` точно противоположны, а средняя точка
/// (при четном n) ровно 0.
#[inline]
pub fn symmetric_grid_point(bound: f32, index: usize, resolution: usize) -> f32 {
    let n = resolution as f32;
    bound * ((2.0 * index as f32 - n) / n)
}

// Модульные тесты
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain() {
        assert_eq!(constrain(5.0, 0.0, 10.0), 5.0);
        assert_eq!(constrain(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(constrain(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_symmetric_grid() {
        assert_eq!(symmetric_grid_point(8.0, 0, 10), -8.0);
        assert_eq!(symmetric_grid_point(8.0, 10, 10), 8.0);
        assert_eq!(symmetric_grid_point(8.0, 5, 10), 0.0);
        for i in 0..=10 {
            assert_eq!(
                symmetric_grid_point(8.0, i, 10),
                -symmetric_grid_point(8.0, 10 - i, 10)
            );
        }
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-7, 1e-6));
        assert!(!approx_eq(1.0, 1.1, 1e-6));
    }
}
