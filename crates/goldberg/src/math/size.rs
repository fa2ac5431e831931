use super::FloatNum;

/// width and height pair, always measured in world units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    width: FloatNum,
    height: FloatNum,
}

impl Size {
    #[inline]
    pub const fn new(width: FloatNum, height: FloatNum) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> FloatNum {
        self.width
    }

    #[inline]
    pub fn height(&self) -> FloatNum {
        self.height
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0. && self.height > 0.
    }
}

impl From<(FloatNum, FloatNum)> for Size {
    fn from((width, height): (FloatNum, FloatNum)) -> Self {
        Size { width, height }
    }
}

impl From<[FloatNum; 2]> for Size {
    fn from([width, height]: [FloatNum; 2]) -> Self {
        Size { width, height }
    }
}

impl From<Size> for (FloatNum, FloatNum) {
    fn from(size: Size) -> Self {
        (size.width, size.height)
    }
}
