use num::BigInt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("元素{num}不在范围[0, {prime})内！")]
    OutOfRange { num: BigInt, prime: BigInt },
    #[error("有限域的阶{prime}必须不小于2！")]
    InvalidModulus { prime: BigInt },
    #[error("不同阶的元素不能运算：{left} != {right}！")]
    FieldMismatch { left: BigInt, right: BigInt },
    #[error("有限域F_{prime}内不能除以0！")]
    DivisionByZero { prime: BigInt },
    #[error("不同曲线的点不能相加！")]
    CurveMismatch,
    #[error("曲线不能定义在F_{prime}上，2y不可逆！")]
    UnsupportedCurveField { prime: BigInt },
    #[error("点({x}, {y})不在曲线上！")]
    NotOnCurve { x: BigInt, y: BigInt },
    #[error("无效输入：x和y必须同时存在或同时为空！")]
    IncompleteCoordinates,
    #[error("点加法出现未处理的情况：{0}")]
    UnhandledCase(String),
}

impl Error {
    /// 是否为内部逻辑错误（而不是调用方的输入错误）
    pub fn is_defect(&self) -> bool {
        matches!(self, Error::UnhandledCase(_))
    }
}
