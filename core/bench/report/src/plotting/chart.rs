/* Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

use charming::{
    Chart,
    component::{
        Axis, DataView, Feature, Grid, Legend, LegendSelectedMode, LegendType, Restore,
        SaveAsImage, Title, Toolbox,
    },
    datatype::DataPoint,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, Label, LabelPosition,
        LineStyle, NameLocation, Orient, SplitLine, Symbol, TextAlign, TextStyle, Tooltip,
    },
    series::{Line, Scatter},
};

/// Marker ECharts uses for a missing value, which breaks the line.
const MISSING_VALUE: &str = "-";

const AXIS_TEXT_SIZE: u32 = 16;

pub struct SweepChart {
    pub inner: Chart,
}

impl SweepChart {
    /// Create a new `SweepChart` with default tooltip, legend, grid, and toolbox.
    pub fn new(title: &str, subtext: &str, dark: bool, strip_title_and_subtext: bool) -> Self {
        let chart = Chart::new();
        let chart = if !strip_title_and_subtext {
            chart.title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(24).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(14).line_height(20))
                    .left("50%")
                    .top("1%"),
            )
        } else {
            chart
        };
        let grid_top = if !strip_title_and_subtext {
            "16%"
        } else {
            "4%"
        };

        let chart = chart
            .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
            .legend(
                Legend::new()
                    .show(true)
                    .right("2%")
                    .top("middle")
                    .orient(Orient::Vertical)
                    .selected_mode(LegendSelectedMode::Multiple)
                    .text_style(TextStyle::new().font_size(12))
                    .padding(10)
                    .item_gap(10)
                    .type_(LegendType::Scroll),
            )
            .grid(
                Grid::new()
                    .left("5%")
                    .right("20%")
                    .top(grid_top)
                    .bottom("8%"),
            )
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_view(DataView::new())
                        .restore(Restore::new())
                        .save_as_image(SaveAsImage::new()),
                ),
            );

        let chart = if dark {
            chart.background_color("#070C18")
        } else {
            chart
        };

        Self { inner: chart }
    }

    /// Configure the X axis as one category per query length.
    pub fn with_query_length_x_axis(mut self, axis_label: &str, query_lengths: &[u32]) -> Self {
        let categories: Vec<String> = query_lengths.iter().map(|l| l.to_string()).collect();
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(axis_label)
                .name_location(NameLocation::Middle)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(30)
                .data(categories)
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    pub fn with_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .position("left")
                .axis_label(AxisLabel::new())
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Add a line series with one value per x axis category.
    ///
    /// `None` values are emitted as missing so the line breaks there
    /// instead of connecting its neighbours.
    pub fn add_series(
        mut self,
        name: &str,
        values: &[Option<f64>],
        symbol: Symbol,
        color: &str,
    ) -> Self {
        let data: Vec<DataPoint> = values
            .iter()
            .map(|v| match v {
                Some(v) => DataPoint::from(*v),
                None => DataPoint::from(MISSING_VALUE),
            })
            .collect();

        let line = Line::new()
            .name(name)
            .data(data)
            .symbol(symbol)
            .symbol_size(8.0)
            .line_style(LineStyle::new().width(3.0))
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(line);
        self
    }

    /// Add a scatter series with labels, placed on the x axis, marking the
    /// categories that have no value.
    pub fn add_gap_markers(
        mut self,
        name: &str,
        markers: Vec<(usize, String)>,
        color: &str,
    ) -> Self {
        if markers.is_empty() {
            return self;
        }

        let data: Vec<DataPoint> = markers
            .into_iter()
            .map(|(idx, label)| DataPoint::from((vec![idx as f64, 0.0], label)))
            .collect();

        let scatter = Scatter::new()
            .name(name)
            .data(data)
            .symbol_size(14.0)
            .item_style(ItemStyle::new().color(color))
            .label(
                Label::new()
                    .show(true)
                    .position(LabelPosition::Top)
                    .font_size(11)
                    .formatter("{b}"),
            );

        self.inner = self.inner.series(scatter);
        self
    }
}
