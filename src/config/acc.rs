//! Конфигурация нечеткого регулятора круиз-контроля
//!
//! Значения подобраны вручную и служат примером настройки, а не
//! проверенной политикой безопасности.

/// Параметры лингвистических переменных
pub mod vocabulary {
    /// Число делений полуширины домена; термов в словаре 2 * NUM_SLICE - 1
    pub const NUM_SLICE: usize = 4;

    /// Число термов каждой переменной
    pub const NUM_TERMS: usize = 2 * NUM_SLICE - 1;

    /// Относительная скорость (лидер - мы), м/с
    pub mod relative_speed {
        pub const CENTER_MS: f32 = 0.0;
        pub const BOUND_MS: f32 = 16.0;
    }

    /// Отношение дистанции к идеальной
    pub mod distance_ratio {
        pub const CENTER: f32 = 1.0;
        pub const HALF_WIDTH: f32 = 1.0;
    }

    /// Выходное ускорение, м/с²
    pub mod acceleration {
        pub const CENTER_MS2: f32 = 0.0;
        pub const BOUND_MS2: f32 = 8.0;
        /// Число интервалов дискретной сетки
        pub const RESOLUTION: usize = 10;
        /// Число отсчетов сетки
        pub const SAMPLES: usize = RESOLUTION + 1;
    }
}

/// Индексы термов
pub mod term {
    /// Отрицательный большой
    pub const NL: u8 = 0;
    /// Отрицательный средний
    pub const NM: u8 = 1;
    /// Отрицательный малый
    pub const NS: u8 = 2;
    /// Около нуля
    pub const AZ: u8 = 3;
    /// Положительный малый
    pub const PS: u8 = 4;
    /// Положительный средний
    pub const PM: u8 = 5;
    /// Положительный большой
    pub const PL: u8 = 6;
}

use term::*;
use vocabulary::NUM_TERMS;

/// База правил [относительная скорость][отношение дистанции] -> ускорение
///
/// Строки: скорость от NL (догоняем) до PL (лидер уходит).
/// Столбцы: дистанция от NL (вплотную) до PL (далеко).
pub const RULE_GRID: [[u8; NUM_TERMS]; NUM_TERMS] = [
    //  NL  NM  NS  AZ  PS  PM  PL     дистанция
    [NL, NL, NM, NM, NM, AZ, PS], // NL
    [NL, NL, NM, NM, NM, AZ, PS], // NM
    [NL, NL, NM, NS, AZ, PM, PM], // NS
    [NL, NL, NS, AZ, PS, PL, PL], // AZ
    [NM, NM, AZ, PS, PM, PL, PL], // PS
    [NS, AZ, PM, PM, PM, PL, PL], // PM
    [NS, AZ, PM, PM, PM, PL, PL], // PL
];
